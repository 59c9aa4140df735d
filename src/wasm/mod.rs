//! WASM bindings for the paginator

pub mod flat_buffer;
mod js_host;

pub use flat_buffer::PlanBuffer;
pub use js_host::JsHost;

use crate::config::{ColumnMode, LayoutConfig};
use crate::document::Content;
use crate::error::LayoutError;
use crate::host::SimulatedHost;
use crate::layout::{paginate, LayoutPlan};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed paginator
#[wasm_bindgen]
pub struct WasmPaginator {
    config: LayoutConfig,
    plan: Option<LayoutPlan>,
    buffer: PlanBuffer,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create a paginator with the default two-column A4 layout
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::two_column())
    }

    /// Create a paginator with the default layout for 1 or 2 columns
    #[wasm_bindgen(js_name = withColumns)]
    pub fn with_columns(columns: u8) -> Result<WasmPaginator, JsError> {
        let config = match ColumnMode::from_count(columns) {
            Some(ColumnMode::Single) => LayoutConfig::single_column(),
            Some(ColumnMode::Double) => LayoutConfig::two_column(),
            None => {
                return Err(JsError::new(&format!(
                    "unsupported column count {}, expected 1 or 2",
                    columns
                )))
            }
        };
        Ok(Self::with_config(config))
    }

    /// Replace the configuration from JSON; missing fields take defaults
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, json: &str) -> Result<(), JsError> {
        self.config = LayoutConfig::from_json_str(json)?;
        Ok(())
    }

    /// Current configuration as JSON
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.config)?)
    }

    /// Lay content out against the built-in simulated host; returns the frame count
    pub fn preview(&mut self, content_json: &str) -> Result<usize, JsError> {
        let mut host = SimulatedHost::default();
        Ok(self.layout(&mut host, content_json)?)
    }

    /// Lay content out against a JavaScript host object; returns the frame count
    #[wasm_bindgen(js_name = layoutWithHost)]
    pub fn layout_with_host(&mut self, content_json: &str, host: JsValue) -> Result<usize, JsError> {
        let mut host = JsHost::new(host);
        Ok(self.layout(&mut host, content_json)?)
    }

    /// Last plan as JSON
    #[wasm_bindgen(js_name = getPlanJson)]
    pub fn get_plan_json(&self) -> Result<String, JsError> {
        match &self.plan {
            Some(plan) => Ok(plan.to_json()?),
            None => Err(JsError::new("no layout has been run")),
        }
    }

    /// One-line summary of the last plan
    #[wasm_bindgen(js_name = getSummary)]
    pub fn get_summary(&self) -> String {
        self.plan.as_ref().map(LayoutPlan::summary).unwrap_or_default()
    }

    /// Get page count
    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> u32 {
        self.plan.as_ref().map_or(0, |plan| plan.pages)
    }

    /// Warnings of the last plan, one per line
    #[wasm_bindgen(js_name = getWarnings)]
    pub fn get_warnings(&self) -> String {
        self.plan
            .as_ref()
            .map(|plan| {
                plan.warnings
                    .iter()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }

    // Flat buffer accessors (see flat_buffer.rs for the layout)

    #[wasm_bindgen(js_name = u32Ptr)]
    pub fn u32_ptr(&self) -> u32 {
        self.buffer.u32_ptr()
    }

    #[wasm_bindgen(js_name = u32Len)]
    pub fn u32_len(&self) -> u32 {
        self.buffer.u32_len()
    }

    #[wasm_bindgen(js_name = f32Ptr)]
    pub fn f32_ptr(&self) -> u32 {
        self.buffer.f32_ptr()
    }

    #[wasm_bindgen(js_name = f32Len)]
    pub fn f32_len(&self) -> u32 {
        self.buffer.f32_len()
    }

    #[wasm_bindgen(js_name = textPtr)]
    pub fn text_ptr(&self) -> u32 {
        self.buffer.text_ptr()
    }

    #[wasm_bindgen(js_name = textLen)]
    pub fn text_len(&self) -> u32 {
        self.buffer.text_len()
    }
}

impl WasmPaginator {
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            plan: None,
            buffer: PlanBuffer::new(),
        }
    }

    pub fn plan(&self) -> Option<&LayoutPlan> {
        self.plan.as_ref()
    }

    fn layout<H: crate::host::HostOracle>(
        &mut self,
        host: &mut H,
        content_json: &str,
    ) -> Result<usize, LayoutError> {
        let content = Content::from_json_str(content_json)?;
        let plan = paginate(host, self.config.clone(), &content)?;
        self.buffer.encode(&plan);
        let frames = plan.frame_count();
        self.plan = Some(plan);
        Ok(frames)
    }
}

impl Default for WasmPaginator {
    fn default() -> Self {
        Self::new()
    }
}
