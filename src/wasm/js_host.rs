//! A JavaScript object acting as the host.
//!
//! The object is expected to provide these methods (ids are numbers):
//!
//! ```text
//! isAvailable() -> bool
//! ensurePage(page)
//! createFrame(page, x, y, width, height, name) -> id
//! configureText(id, fontSize, lineSpacing)
//! assignText(id, text) -> overflowed
//! geometry(id) -> [x, y, width, height]
//! lineCount(id) -> number
//! overflows(id) -> bool
//! contentMargins(id) -> [top, bottom]
//! link(fromId, toId)
//! resize(id, width, height)
//! font(id) -> string
//! availableFonts() -> string[]
//! setFont(id, name)
//! ```
//!
//! A thrown exception becomes an [`OracleError`] of the matching kind.

use crate::config::TextStyle;
use crate::error::OracleError;
use crate::host::{ContentMargins, FrameId, HostOracle};
use crate::Rect;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub struct JsHost {
    target: JsValue,
}

impl JsHost {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn invoke(&self, method: &str, args: &[JsValue]) -> Result<JsValue, String> {
        let func = Reflect::get(&self.target, &JsValue::from_str(method)).map_err(describe)?;
        let func: Function = func
            .dyn_into()
            .map_err(|_| format!("host has no `{}` method", method))?;
        let args: Array = args.iter().collect();
        func.apply(&self.target, &args).map_err(describe)
    }

    fn numbers(&self, method: &str, frame: FrameId, expected: usize) -> Result<Vec<f32>, OracleError> {
        let measurement = |reason: String| OracleError::Measurement { frame, reason };

        let value = self.invoke(method, &[id_value(frame)]).map_err(measurement)?;
        let array: Array = value
            .dyn_into()
            .map_err(|_| measurement(format!("`{}` did not return an array", method)))?;
        let values: Vec<f32> = array
            .iter()
            .filter_map(|v| v.as_f64())
            .map(|v| v as f32)
            .collect();
        if values.len() < expected {
            return Err(measurement(format!(
                "`{}` returned {} numbers, expected {}",
                method,
                values.len(),
                expected
            )));
        }
        Ok(values)
    }
}

fn id_value(frame: FrameId) -> JsValue {
    JsValue::from_f64(frame.0 as f64)
}

fn describe(value: JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

impl HostOracle for JsHost {
    fn is_available(&self) -> bool {
        self.invoke("isAvailable", &[])
            .map(|value| value.as_bool().unwrap_or(false))
            .unwrap_or(false)
    }

    fn ensure_page(&mut self, page: u32) -> Result<(), OracleError> {
        self.invoke("ensurePage", &[JsValue::from(page)])
            .map(drop)
            .map_err(|reason| OracleError::Page { page, reason })
    }

    fn create_frame(&mut self, page: u32, rect: Rect, name: &str) -> Result<FrameId, OracleError> {
        let creation = |reason: String| OracleError::Creation {
            name: name.to_string(),
            reason,
        };

        let value = self
            .invoke(
                "createFrame",
                &[
                    JsValue::from(page),
                    JsValue::from(rect.x),
                    JsValue::from(rect.y),
                    JsValue::from(rect.width),
                    JsValue::from(rect.height),
                    JsValue::from_str(name),
                ],
            )
            .map_err(creation)?;
        let id = value
            .as_f64()
            .ok_or_else(|| creation("`createFrame` did not return a numeric id".to_string()))?;
        Ok(FrameId(id as u64))
    }

    fn configure_text(&mut self, frame: FrameId, style: &TextStyle) -> Result<(), OracleError> {
        self.invoke(
            "configureText",
            &[
                id_value(frame),
                JsValue::from(style.font_size),
                JsValue::from(style.line_spacing),
            ],
        )
        .map(drop)
        .map_err(|reason| OracleError::Style { frame, reason })
    }

    fn assign_text(&mut self, frame: FrameId, text: &str) -> Result<bool, OracleError> {
        self.invoke("assignText", &[id_value(frame), JsValue::from_str(text)])
            .map(|value| value.as_bool().unwrap_or(true))
            .map_err(|reason| OracleError::Measurement { frame, reason })
    }

    fn geometry(&self, frame: FrameId) -> Result<Rect, OracleError> {
        let values = self.numbers("geometry", frame, 4)?;
        Ok(Rect::new(values[0], values[1], values[2], values[3]))
    }

    fn line_count(&self, frame: FrameId) -> Result<usize, OracleError> {
        let value = self
            .invoke("lineCount", &[id_value(frame)])
            .map_err(|reason| OracleError::Measurement { frame, reason })?;
        value
            .as_f64()
            .map(|lines| lines.max(0.0) as usize)
            .ok_or_else(|| OracleError::Measurement {
                frame,
                reason: "`lineCount` did not return a number".to_string(),
            })
    }

    fn overflows(&self, frame: FrameId) -> Result<bool, OracleError> {
        let value = self
            .invoke("overflows", &[id_value(frame)])
            .map_err(|reason| OracleError::Measurement { frame, reason })?;
        value.as_bool().ok_or_else(|| OracleError::Measurement {
            frame,
            reason: "`overflows` did not return a boolean".to_string(),
        })
    }

    fn content_margins(&self, frame: FrameId) -> Result<ContentMargins, OracleError> {
        let values = self.numbers("contentMargins", frame, 2)?;
        Ok(ContentMargins::new(values[0], values[1]))
    }

    fn link(&mut self, from: FrameId, to: FrameId) -> Result<(), OracleError> {
        self.invoke("link", &[id_value(from), id_value(to)])
            .map(drop)
            .map_err(|reason| OracleError::Link { from, to, reason })
    }

    fn resize(&mut self, frame: FrameId, width: f32, height: f32) -> Result<(), OracleError> {
        self.invoke(
            "resize",
            &[id_value(frame), JsValue::from(width), JsValue::from(height)],
        )
        .map(drop)
        .map_err(|reason| OracleError::Resize { frame, reason })
    }

    fn font(&self, frame: FrameId) -> Result<String, OracleError> {
        let value = self
            .invoke("font", &[id_value(frame)])
            .map_err(|reason| OracleError::Style { frame, reason })?;
        value.as_string().ok_or_else(|| OracleError::Style {
            frame,
            reason: "`font` did not return a string".to_string(),
        })
    }

    fn available_fonts(&self) -> Result<Vec<String>, OracleError> {
        let unavailable = |reason: String| OracleError::Style {
            frame: FrameId(0),
            reason,
        };

        let value = self.invoke("availableFonts", &[]).map_err(unavailable)?;
        let array: Array = value
            .dyn_into()
            .map_err(|_| unavailable("`availableFonts` did not return an array".to_string()))?;
        Ok(array.iter().filter_map(|v| v.as_string()).collect())
    }

    fn set_font(&mut self, frame: FrameId, font: &str) -> Result<(), OracleError> {
        self.invoke("setFont", &[id_value(frame), JsValue::from_str(font)])
            .map(drop)
            .map_err(|reason| OracleError::Style { frame, reason })
    }
}
