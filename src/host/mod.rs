//! The host application's text-layout capabilities.
//!
//! The placement engine never measures text itself. It creates frames,
//! hands them text and asks the host what happened: does the text overflow,
//! how many lines landed in this frame, where did the frame end up. Any
//! desktop-publishing application that can answer those questions can drive
//! the engine by implementing [`HostOracle`].
//!
//! [`SimulatedHost`] is an in-memory implementation used for previews,
//! benchmarks and tests.

mod adapter;
pub mod line_break;
pub mod metrics;
mod sim;

pub use adapter::{OracleAdapter, MIN_FRAME_DIMENSION};
pub use line_break::{LineBreaker, LineSpan};
pub use metrics::{FontLibrary, FontMetrics, DEFAULT_FONT};
pub use sim::{Faults, SimulatedHost, SimFrameInfo};

use crate::config::TextStyle;
use crate::error::OracleError;
use crate::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-side identity of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Distance between the frame edge and the text area
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentMargins {
    pub top: f32,
    pub bottom: f32,
}

impl ContentMargins {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Combined vertical inset
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Text-layout primitives supplied by the host application.
///
/// Every call may fail; callers decide the fallback. Calls are synchronous
/// and a frame's text is reflowed before a mutating call returns.
pub trait HostOracle {
    /// Whether the host can be driven at all; checked once per run
    fn is_available(&self) -> bool;

    /// Make sure pages `1..=page` exist
    fn ensure_page(&mut self, page: u32) -> Result<(), OracleError>;

    /// Create an empty text frame. Dimensions are already clamped by the caller.
    fn create_frame(&mut self, page: u32, rect: Rect, name: &str) -> Result<FrameId, OracleError>;

    /// Set font size and fixed line spacing
    fn configure_text(&mut self, frame: FrameId, style: &TextStyle) -> Result<(), OracleError>;

    /// Set the frame's text, reflow, and report whether it overflows
    fn assign_text(&mut self, frame: FrameId, text: &str) -> Result<bool, OracleError>;

    /// Current position and size
    fn geometry(&self, frame: FrameId) -> Result<Rect, OracleError>;

    /// Number of lines laid out inside this frame
    fn line_count(&self, frame: FrameId) -> Result<usize, OracleError>;

    /// Whether text continues past this frame with nowhere to go
    fn overflows(&self, frame: FrameId) -> Result<bool, OracleError>;

    /// Top and bottom text insets
    fn content_margins(&self, frame: FrameId) -> Result<ContentMargins, OracleError>;

    /// Continue `from`'s text flow into `to`
    fn link(&mut self, from: FrameId, to: FrameId) -> Result<(), OracleError>;

    /// Change the frame size, keeping its origin
    fn resize(&mut self, frame: FrameId, width: f32, height: f32) -> Result<(), OracleError>;

    /// Full name of the frame's current font
    fn font(&self, frame: FrameId) -> Result<String, OracleError>;

    /// Every font the host can apply
    fn available_fonts(&self) -> Result<Vec<String>, OracleError>;

    /// Switch the frame's font
    fn set_font(&mut self, frame: FrameId, font: &str) -> Result<(), OracleError>;
}
