//! The record of a layout run

use crate::config::ColumnMode;
use crate::document::ItemKind;
use crate::error::LayoutError;
use crate::host::FrameId;
use crate::Rect;
use serde::Serialize;
use std::fmt;

/// One frame created on the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedFrame {
    pub id: FrameId,
    pub name: String,
    /// Index of the item in the run
    pub item: usize,
    pub kind: ItemKind,
    /// Position within the item's chain (0-based)
    pub chain_index: usize,
    pub page: u32,
    /// 0-based column slot
    pub column: usize,
    /// Last observed geometry
    pub rect: Rect,
    /// Frame this one continues, if the link was made
    pub linked_from: Option<FrameId>,
    /// Created but could not be linked into its chain
    pub orphaned: bool,
    /// Shrunk to fit its lines
    pub reclaimed: bool,
}

/// How an item's placement ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// All text placed
    Complete,
    /// Chaining stopped early after a host failure; text is missing
    Truncated,
    /// Nothing placed
    Skipped,
    /// The chain hit the frame cap while still overflowing
    CapReached,
}

/// Per-item summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    pub index: usize,
    /// Frame name prefix, e.g. `sec1_x2`
    pub name: String,
    pub kind: ItemKind,
    pub section_index: usize,
    pub status: ItemStatus,
    /// Indices into [`LayoutPlan::frames`]
    pub frames: Vec<usize>,
    /// The last linked frame still overflows
    pub overflowing: bool,
}

/// Something that went wrong but did not stop the run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    ItemSkipped { item: String, reason: String },
    ChainTruncated { item: String, reason: String },
    ChainCapReached { item: String, frames: usize },
    FrameOrphaned { item: String, frame: String, reason: String },
    ReclaimFailed { item: String, frame: String, reason: String },
    StyleFailed { item: String, frame: String, reason: String },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::ItemSkipped { item, reason } => {
                write!(f, "{}: skipped ({})", item, reason)
            }
            LayoutWarning::ChainTruncated { item, reason } => {
                write!(f, "{}: chain truncated ({})", item, reason)
            }
            LayoutWarning::ChainCapReached { item, frames } => {
                write!(f, "{}: still overflowing after {} frames", item, frames)
            }
            LayoutWarning::FrameOrphaned {
                item,
                frame,
                reason,
            } => write!(f, "{}: frame {} left unlinked ({})", item, frame, reason),
            LayoutWarning::ReclaimFailed {
                item,
                frame,
                reason,
            } => write!(f, "{}: height of {} not reclaimed ({})", item, frame, reason),
            LayoutWarning::StyleFailed {
                item,
                frame,
                reason,
            } => write!(f, "{}: styling {} failed ({})", item, frame, reason),
        }
    }
}

/// Frames, item outcomes and warnings of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub mode: ColumnMode,
    pub sections: usize,
    /// Highest page number used
    pub pages: u32,
    pub frames: Vec<PlacedFrame>,
    pub items: Vec<ItemRecord>,
    pub warnings: Vec<LayoutWarning>,
}

impl LayoutPlan {
    pub fn new(mode: ColumnMode) -> Self {
        Self {
            mode,
            sections: 0,
            pages: 0,
            frames: Vec::new(),
            items: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Get frame count
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frames of one item, in chain order
    pub fn frames_for_item(&self, item: usize) -> impl Iterator<Item = &PlacedFrame> {
        self.frames.iter().filter(move |frame| frame.item == item)
    }

    /// Frames placed on a page
    pub fn frames_on_page(&self, page: u32) -> impl Iterator<Item = &PlacedFrame> {
        self.frames.iter().filter(move |frame| frame.page == page)
    }

    pub fn frame_named(&self, name: &str) -> Option<&PlacedFrame> {
        self.frames.iter().find(|frame| frame.name == name)
    }

    /// Items that did not end `Complete`
    pub fn incomplete_items(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items
            .iter()
            .filter(|item| item.status != ItemStatus::Complete)
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// One-line run summary
    pub fn summary(&self) -> String {
        format!(
            "{} sections, {} items, {} frames, {} pages, {} warnings",
            self.sections,
            self.items.len(),
            self.frames.len(),
            self.pages,
            self.warnings.len()
        )
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
