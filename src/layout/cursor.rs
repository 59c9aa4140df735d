//! Where the next frame may go

use crate::layout::topology::ColumnTopology;
use serde::Serialize;
use smallvec::SmallVec;

/// Lowest occupied y coordinate of one column on the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnState {
    pub bottom_y: f32,
}

/// A spot for a new frame's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPosition {
    /// 1-based page number
    pub page: u32,
    /// 0-based column slot
    pub column: usize,
    pub y: f32,
}

/// Mutable placement state for one run
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    page: u32,
    columns: SmallVec<[ColumnState; 2]>,
    top_margin: f32,
    previous_section: Option<usize>,
}

impl LayoutCursor {
    /// Start on page 1 with every column empty
    pub fn new(topology: &ColumnTopology, top_margin: f32) -> Self {
        Self {
            page: 1,
            columns: (0..topology.len())
                .map(|_| ColumnState { bottom_y: top_margin })
                .collect(),
            top_margin,
            previous_section: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Occupied bottom of a column; unknown columns read as empty
    pub fn bottom(&self, column: usize) -> f32 {
        self.columns
            .get(column)
            .map_or(self.top_margin, |state| state.bottom_y)
    }

    pub fn set_bottom(&mut self, column: usize, bottom_y: f32) {
        if let Some(state) = self.columns.get_mut(column) {
            state.bottom_y = bottom_y;
        }
    }

    /// Move to a fresh page; every column starts at the top margin
    pub fn start_new_page(&mut self) -> u32 {
        self.page += 1;
        for state in &mut self.columns {
            state.bottom_y = self.top_margin;
        }
        self.page
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    pub fn previous_section(&self) -> Option<usize> {
        self.previous_section
    }

    /// Record the section of the item being placed and return the previous one
    pub fn enter_section(&mut self, section: usize) -> Option<usize> {
        self.previous_section.replace(section)
    }
}
