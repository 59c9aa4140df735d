//! Column slots on a page

use crate::config::LayoutConfig;
use smallvec::SmallVec;

/// One vertical strip of the page text flows into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlot {
    /// Left edge
    pub x: f32,
    pub width: f32,
}

/// Ordered column slots, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTopology {
    slots: SmallVec<[ColumnSlot; 2]>,
}

impl ColumnTopology {
    /// Slots for the configured column mode
    pub fn from_config(config: &LayoutConfig) -> Self {
        let width = config.column_width();
        let slots = (0..config.mode.slot_count())
            .map(|index| ColumnSlot {
                x: config.margin_left + index as f32 * (width + config.column_gap),
                width,
            })
            .collect();
        Self { slots }
    }

    /// Get slot count
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, column: usize) -> Option<&ColumnSlot> {
        self.slots.get(column)
    }

    pub fn slots(&self) -> &[ColumnSlot] {
        &self.slots
    }

    /// Check if `column` is the rightmost slot
    pub fn is_last(&self, column: usize) -> bool {
        column + 1 >= self.slots.len()
    }

    /// Slot whose left edge is nearest to `x`
    pub fn slot_for_x(&self, x: f32) -> usize {
        let mut best = 0;
        let mut best_distance = f32::MAX;
        for (index, slot) in self.slots.iter().enumerate() {
            let distance = (slot.x - x).abs();
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }
}
