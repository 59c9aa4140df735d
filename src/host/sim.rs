//! In-memory host used for previews, benchmarks and tests.
//!
//! Frames are laid out with the greedy [`LineBreaker`] and per-font advance
//! tables. A chain's text lives on its head frame and is reflowed through
//! every linked frame after each change, the way a desktop-publishing
//! application reflows a text chain.

use crate::config::TextStyle;
use crate::error::OracleError;
use crate::host::line_break::LineBreaker;
use crate::host::metrics::{FontLibrary, FontMetrics, DEFAULT_FONT};
use crate::host::{ContentMargins, FrameId, HostOracle};
use crate::Rect;
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::Range;

/// Failures to inject into the simulated host
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Report the host as unavailable
    pub unavailable: bool,
    /// Refuse to create frames whose name contains any of these
    pub fail_create: Vec<String>,
    /// Every link call fails
    pub fail_link: bool,
    /// Every resize call fails
    pub fail_resize: bool,
    /// Geometry queries fail for frames that have been resized
    pub fail_geometry_after_resize: bool,
    /// Text assignment, overflow, line count and margin queries fail
    pub fail_measurement: bool,
    /// Text style and font calls fail
    pub fail_styling: bool,
    /// The installed font list cannot be read
    pub fail_font_list: bool,
    /// Every frame reports overflow regardless of its text
    pub force_overflow: bool,
    /// Pages beyond this number cannot be created
    pub max_pages: Option<u32>,
}

#[derive(Debug, Clone)]
struct SimFrame {
    name: String,
    page: u32,
    rect: Rect,
    style: TextStyle,
    font: String,
    /// Chain text; only meaningful on the head frame
    text: String,
    prev: Option<FrameId>,
    next: Option<FrameId>,
    /// Byte range of the chain text laid out in this frame
    laid_out: Range<usize>,
    lines: usize,
    overflow: bool,
}

/// Read-only snapshot of a simulated frame
#[derive(Debug, Clone, PartialEq)]
pub struct SimFrameInfo {
    pub id: FrameId,
    pub name: String,
    pub page: u32,
    pub rect: Rect,
    pub font: String,
    /// Text laid out inside this frame
    pub text: String,
    pub lines: usize,
    pub overflow: bool,
    pub prev: Option<FrameId>,
    pub next: Option<FrameId>,
}

pub struct SimulatedHost {
    pages: u32,
    frames: FxHashMap<FrameId, SimFrame>,
    order: Vec<FrameId>,
    names: FxHashSet<String>,
    next_id: u64,
    library: FontLibrary,
    fallback_metrics: FontMetrics,
    insets: ContentMargins,
    breaker: LineBreaker,
    resized: FxHashSet<FrameId>,
    faults: Faults,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new(FontLibrary::default())
    }
}

impl SimulatedHost {
    pub fn new(library: FontLibrary) -> Self {
        Self {
            pages: 0,
            frames: FxHashMap::default(),
            order: Vec::new(),
            names: FxHashSet::default(),
            next_id: 1,
            library,
            fallback_metrics: FontMetrics::default(),
            insets: ContentMargins::default(),
            breaker: LineBreaker::new(),
            resized: FxHashSet::default(),
            faults: Faults::default(),
        }
    }

    /// Default fonts with the given failures
    pub fn with_faults(faults: Faults) -> Self {
        let mut host = Self::default();
        host.faults = faults;
        host
    }

    /// Set the text insets applied to every frame
    pub fn with_insets(mut self, insets: ContentMargins) -> Self {
        self.insets = insets;
        self
    }

    pub fn faults_mut(&mut self) -> &mut Faults {
        &mut self.faults
    }

    pub fn page_count(&self) -> u32 {
        self.pages
    }

    pub fn frame_count(&self) -> usize {
        self.order.len()
    }

    /// Every frame in creation order
    pub fn frames(&self) -> Vec<SimFrameInfo> {
        self.order.iter().filter_map(|id| self.info(*id)).collect()
    }

    /// Snapshot of one frame
    pub fn info(&self, id: FrameId) -> Option<SimFrameInfo> {
        let frame = self.frames.get(&id)?;
        let text = self
            .chain_text(id)
            .and_then(|text| text.get(frame.laid_out.clone()))
            .unwrap_or_default()
            .to_string();

        Some(SimFrameInfo {
            id,
            name: frame.name.clone(),
            page: frame.page,
            rect: frame.rect,
            font: frame.font.clone(),
            text,
            lines: frame.lines,
            overflow: frame.overflow,
            prev: frame.prev,
            next: frame.next,
        })
    }

    /// Find a frame by name
    pub fn frame_named(&self, name: &str) -> Option<SimFrameInfo> {
        self.order
            .iter()
            .find(|id| self.frames.get(id).is_some_and(|f| f.name == name))
            .and_then(|id| self.info(*id))
    }

    fn frame(&self, id: FrameId) -> Result<&SimFrame, OracleError> {
        self.frames.get(&id).ok_or(OracleError::UnknownFrame(id))
    }

    fn frame_mut(&mut self, id: FrameId) -> Result<&mut SimFrame, OracleError> {
        self.frames.get_mut(&id).ok_or(OracleError::UnknownFrame(id))
    }

    fn head(&self, id: FrameId) -> FrameId {
        let mut current = id;
        while let Some(prev) = self.frames.get(&current).and_then(|f| f.prev) {
            current = prev;
        }
        current
    }

    fn chain_text(&self, id: FrameId) -> Option<&str> {
        self.frames.get(&self.head(id)).map(|f| f.text.as_str())
    }

    fn measurement_fault(&self, frame: FrameId) -> Result<(), OracleError> {
        if self.faults.fail_measurement {
            return Err(OracleError::Measurement {
                frame,
                reason: "measurement unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn style_fault(&self, frame: FrameId) -> Result<(), OracleError> {
        if self.faults.fail_styling {
            return Err(OracleError::Style {
                frame,
                reason: "styling unavailable".to_string(),
            });
        }
        Ok(())
    }

    /// Lay the chain's text out again, frame by frame
    fn reflow(&mut self, id: FrameId) {
        let head = self.head(id);
        let text = match self.frames.get(&head) {
            Some(frame) => frame.text.clone(),
            None => return,
        };

        let mut chain = Vec::new();
        let mut current = Some(head);
        while let Some(frame_id) = current {
            chain.push(frame_id);
            current = self.frames.get(&frame_id).and_then(|f| f.next);
        }

        let mut offset = 0;
        let last = chain.len().saturating_sub(1);
        for (position, frame_id) in chain.into_iter().enumerate() {
            let Some(frame) = self.frames.get(&frame_id) else {
                continue;
            };
            let metrics = self.library.get(&frame.font).unwrap_or(&self.fallback_metrics);
            let capacity = line_capacity(frame.rect.height - self.insets.vertical(), frame.style.line_spacing);
            let remaining = &text[offset..];
            let lines = self
                .breaker
                .break_lines(remaining, frame.rect.width, metrics, frame.style.font_size);
            let taken = capacity.min(lines.len());
            let consumed = if taken > 0 {
                lines[taken - 1].byte_range.end
            } else {
                0
            };
            let more = lines.len() > taken;

            if let Some(frame) = self.frames.get_mut(&frame_id) {
                frame.laid_out = offset..offset + consumed;
                frame.lines = taken;
                frame.overflow = position == last && more;
            }
            offset += consumed;
        }
    }
}

/// Whole lines of `spacing` that fit in `height`
fn line_capacity(height: f32, spacing: f32) -> usize {
    if spacing <= 0.0 || height <= 0.0 {
        return 0;
    }
    (height / spacing + 1e-3).floor() as usize
}

impl HostOracle for SimulatedHost {
    fn is_available(&self) -> bool {
        !self.faults.unavailable
    }

    fn ensure_page(&mut self, page: u32) -> Result<(), OracleError> {
        if let Some(max) = self.faults.max_pages {
            if page > max {
                return Err(OracleError::Page {
                    page,
                    reason: format!("document is limited to {} pages", max),
                });
            }
        }
        self.pages = self.pages.max(page);
        Ok(())
    }

    fn create_frame(&mut self, page: u32, rect: Rect, name: &str) -> Result<FrameId, OracleError> {
        let creation_error = |reason: &str| OracleError::Creation {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if page == 0 || page > self.pages {
            return Err(creation_error("page does not exist"));
        }
        if self.names.contains(name) {
            return Err(creation_error("name already in use"));
        }
        if self.faults.fail_create.iter().any(|needle| name.contains(needle.as_str())) {
            return Err(creation_error("refused by host"));
        }

        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.frames.insert(
            id,
            SimFrame {
                name: name.to_string(),
                page,
                rect,
                style: TextStyle::new(12.0, 12.0 * 1.2),
                font: DEFAULT_FONT.to_string(),
                text: String::new(),
                prev: None,
                next: None,
                laid_out: 0..0,
                lines: 0,
                overflow: false,
            },
        );
        self.names.insert(name.to_string());
        self.order.push(id);
        Ok(id)
    }

    fn configure_text(&mut self, frame: FrameId, style: &TextStyle) -> Result<(), OracleError> {
        self.style_fault(frame)?;
        self.frame_mut(frame)?.style = *style;
        self.reflow(frame);
        Ok(())
    }

    fn assign_text(&mut self, frame: FrameId, text: &str) -> Result<bool, OracleError> {
        let head = self.head(frame);
        self.frame_mut(head)?.text = text.to_string();
        self.reflow(head);
        self.measurement_fault(frame)?;
        self.overflows(frame)
    }

    fn geometry(&self, frame: FrameId) -> Result<Rect, OracleError> {
        if self.faults.fail_geometry_after_resize && self.resized.contains(&frame) {
            return Err(OracleError::Measurement {
                frame,
                reason: "geometry unavailable after resize".to_string(),
            });
        }
        Ok(self.frame(frame)?.rect)
    }

    fn line_count(&self, frame: FrameId) -> Result<usize, OracleError> {
        self.measurement_fault(frame)?;
        Ok(self.frame(frame)?.lines)
    }

    fn overflows(&self, frame: FrameId) -> Result<bool, OracleError> {
        self.measurement_fault(frame)?;
        let overflow = self.frame(frame)?.overflow;
        Ok(overflow || self.faults.force_overflow)
    }

    fn content_margins(&self, frame: FrameId) -> Result<ContentMargins, OracleError> {
        self.measurement_fault(frame)?;
        self.frame(frame)?;
        Ok(self.insets)
    }

    fn link(&mut self, from: FrameId, to: FrameId) -> Result<(), OracleError> {
        let link_error = |reason: &str| OracleError::Link {
            from,
            to,
            reason: reason.to_string(),
        };

        if self.faults.fail_link {
            return Err(link_error("refused by host"));
        }
        if from == to {
            return Err(link_error("cannot link a frame to itself"));
        }
        let source = self.frame(from)?;
        let target = self.frame(to)?;
        if source.next.is_some() {
            return Err(link_error("source already continues elsewhere"));
        }
        if target.prev.is_some() || target.next.is_some() {
            return Err(link_error("target is already part of a chain"));
        }
        if self.head(from) == to {
            return Err(link_error("link would close a loop"));
        }

        if let Some(target) = self.frames.get_mut(&to) {
            target.text.clear();
            target.prev = Some(from);
        }
        if let Some(source) = self.frames.get_mut(&from) {
            source.next = Some(to);
        }
        self.reflow(from);
        Ok(())
    }

    fn resize(&mut self, frame: FrameId, width: f32, height: f32) -> Result<(), OracleError> {
        if self.faults.fail_resize {
            return Err(OracleError::Resize {
                frame,
                reason: "refused by host".to_string(),
            });
        }
        let target = self.frame_mut(frame)?;
        target.rect.width = width;
        target.rect.height = height;
        self.resized.insert(frame);
        self.reflow(frame);
        Ok(())
    }

    fn font(&self, frame: FrameId) -> Result<String, OracleError> {
        self.style_fault(frame)?;
        Ok(self.frame(frame)?.font.clone())
    }

    fn available_fonts(&self) -> Result<Vec<String>, OracleError> {
        if self.faults.fail_font_list {
            return Err(OracleError::Style {
                frame: FrameId(0),
                reason: "font list unavailable".to_string(),
            });
        }
        Ok(self.library.names())
    }

    fn set_font(&mut self, frame: FrameId, font: &str) -> Result<(), OracleError> {
        self.style_fault(frame)?;
        if !self.library.contains(font) {
            return Err(OracleError::Style {
                frame,
                reason: format!("font `{}` is not installed", font),
            });
        }
        self.frame_mut(frame)?.font = font.to_string();
        self.reflow(frame);
        Ok(())
    }
}
