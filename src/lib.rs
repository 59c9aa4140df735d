//! colflow: multi-column document pagination
//!
//! This crate places titles and paragraphs into text frames on a host
//! desktop-publishing application:
//! - Column/page fitting with item and section spacing
//! - Overflow chaining into linked frames across columns and pages
//! - Height reclamation of each item's last frame
//! - One engine for one- and two-column layouts
//!
//! The host does all text measurement through the [`HostOracle`] trait.
//! [`SimulatedHost`] implements it in memory for previews and tests.

pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod layout;
pub mod units;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use config::{ColumnMode, LayoutConfig, TextStyle};
pub use document::{Content, ContentItem, ItemKind, Section};
pub use error::{LayoutError, OracleError};
pub use host::{FrameId, HostOracle, SimulatedHost};
pub use layout::{paginate, Engine, ItemStatus, LayoutPlan, LayoutWarning, PlacedFrame};

use serde::{Deserialize, Serialize};

/// Page rectangle in points; y grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
