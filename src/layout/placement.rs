//! Placement decisions.
//!
//! These functions only look at the configuration, the column slots and the
//! cursor; they never talk to the host. The cursor moves to a new page when
//! no slot on the current one has room.

use crate::config::LayoutConfig;
use crate::layout::cursor::{LayoutCursor, LayoutPosition};
use crate::layout::topology::ColumnTopology;
use crate::Rect;

/// Vertical gap to leave above an item.
///
/// Nothing before the first item of a run, the item gap between items of
/// one section, and the section gap on top of it when the section changes.
pub fn space_before(previous_section: Option<usize>, section: usize, config: &LayoutConfig) -> f32 {
    match previous_section {
        None => 0.0,
        Some(previous) if previous != section => config.section_gap + config.item_gap,
        Some(_) => config.item_gap,
    }
}

/// Whether a frame starting at `y` would get at least the minimum height
pub fn fits_at(config: &LayoutConfig, y: f32) -> bool {
    config.available_below(y) >= config.min_placeable_height
}

/// Top-left corner for an item's first frame.
///
/// Takes the first slot, left to right, with room below its bottom plus
/// `space_before`. When none has room a new page is started and the frame
/// goes to the first column at the top margin without leading space.
pub fn first_position(
    cursor: &mut LayoutCursor,
    topology: &ColumnTopology,
    config: &LayoutConfig,
    space_before: f32,
) -> LayoutPosition {
    for column in 0..topology.len() {
        let y = cursor.bottom(column) + space_before;
        if fits_at(config, y) {
            return LayoutPosition {
                page: cursor.page(),
                column,
                y,
            };
        }
    }

    let page = cursor.start_new_page();
    LayoutPosition {
        page,
        column: 0,
        y: config.margin_top,
    }
}

/// Top-left corner for the frame that continues an overflowing `previous`.
///
/// Continues directly below it when its column still has room, otherwise in
/// the next column at that column's bottom, otherwise on a new page.
pub fn continuation_position(
    cursor: &mut LayoutCursor,
    topology: &ColumnTopology,
    config: &LayoutConfig,
    previous: Rect,
) -> LayoutPosition {
    let column = topology.slot_for_x(previous.x);

    let below = previous.bottom();
    if fits_at(config, below) {
        return LayoutPosition {
            page: cursor.page(),
            column,
            y: below,
        };
    }

    if !topology.is_last(column) {
        let next = column + 1;
        let y = cursor.bottom(next);
        if fits_at(config, y) {
            return LayoutPosition {
                page: cursor.page(),
                column: next,
                y,
            };
        }
    }

    let page = cursor.start_new_page();
    LayoutPosition {
        page,
        column: 0,
        y: config.margin_top,
    }
}

/// Height for a frame whose top edge is at `y`: everything down to the
/// bottom margin, raised to the minimum placeable height when the page
/// content area can hold that much, and 1pt when nothing is left
pub fn frame_height(config: &LayoutConfig, y: f32) -> f32 {
    let mut height = config.available_below(y);
    if height < config.min_placeable_height && config.content_height() >= config.min_placeable_height {
        height = config.min_placeable_height;
    }
    if height <= 0.0 {
        height = 1.0;
    }
    height
}

/// Requested rectangle for a frame at `position`
pub fn frame_rect(topology: &ColumnTopology, config: &LayoutConfig, position: &LayoutPosition) -> Rect {
    let (x, width) = topology
        .slot(position.column)
        .map_or((config.margin_left, config.column_width()), |slot| (slot.x, slot.width));
    Rect::new(x, position.y, width, frame_height(config, position.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(config: &LayoutConfig) -> (ColumnTopology, LayoutCursor) {
        let topology = config.topology();
        let cursor = LayoutCursor::new(&topology, config.margin_top);
        (topology, cursor)
    }

    #[test]
    fn test_space_before() {
        let config = LayoutConfig::default();
        assert_eq!(space_before(None, 3, &config), 0.0);
        assert_eq!(space_before(Some(0), 0, &config), config.item_gap);
        assert_eq!(
            space_before(Some(0), 1, &config),
            config.section_gap + config.item_gap
        );
    }

    #[test]
    fn test_first_position_prefers_first_column() {
        let config = LayoutConfig::default();
        let (topology, mut cursor) = setup(&config);
        cursor.set_bottom(0, 200.0);

        let position = first_position(&mut cursor, &topology, &config, 10.0);
        assert_eq!(position.page, 1);
        assert_eq!(position.column, 0);
        assert_eq!(position.y, 210.0);
    }

    #[test]
    fn test_first_position_falls_to_second_column() {
        let config = LayoutConfig::default();
        let (topology, mut cursor) = setup(&config);
        // Less than the minimum left under column 1
        let full = config.page_height - config.margin_bottom - 10.0;
        cursor.set_bottom(0, full);

        let position = first_position(&mut cursor, &topology, &config, config.item_gap);
        assert_eq!(position.column, 1);
        assert_eq!(position.y, config.margin_top + config.item_gap);
    }

    #[test]
    fn test_first_position_new_page_has_no_leading_space() {
        let config = LayoutConfig::default();
        let (topology, mut cursor) = setup(&config);
        let full = config.page_height - config.margin_bottom - 1.0;
        cursor.set_bottom(0, full);
        cursor.set_bottom(1, full);

        let position = first_position(&mut cursor, &topology, &config, config.item_gap);
        assert_eq!(position.page, 2);
        assert_eq!(position.column, 0);
        assert_eq!(position.y, config.margin_top);
        assert_eq!(cursor.bottom(1), config.margin_top);
    }

    #[test]
    fn test_space_before_counts_against_room() {
        let config = LayoutConfig {
            page_height: 800.0,
            margin_top: 40.0,
            margin_bottom: 40.0,
            min_placeable_height: 25.0,
            ..LayoutConfig::single_column()
        };
        let (topology, mut cursor) = setup(&config);
        // Exactly the minimum is left, but the gap pushes it below
        cursor.set_bottom(0, 735.0);

        assert_eq!(first_position(&mut cursor.clone(), &topology, &config, 0.0).page, 1);
        assert_eq!(first_position(&mut cursor, &topology, &config, 1.0).page, 2);
    }

    #[test]
    fn test_continuation_same_column() {
        let config = LayoutConfig::default();
        let (topology, mut cursor) = setup(&config);
        let previous = Rect::new(config.margin_left, 40.0, config.column_width(), 100.0);

        let position = continuation_position(&mut cursor, &topology, &config, previous);
        assert_eq!(position.column, 0);
        assert_eq!(position.y, 140.0);
    }

    #[test]
    fn test_continuation_moves_to_second_column_bottom() {
        let config = LayoutConfig::default();
        let (topology, mut cursor) = setup(&config);
        cursor.set_bottom(1, 300.0);
        let previous = Rect::new(
            config.margin_left,
            config.margin_top,
            config.column_width(),
            config.content_height(),
        );

        let position = continuation_position(&mut cursor, &topology, &config, previous);
        assert_eq!(position.page, 1);
        assert_eq!(position.column, 1);
        assert_eq!(position.y, 300.0);
    }

    #[test]
    fn test_continuation_from_last_column_opens_page() {
        let config = LayoutConfig::default();
        let (topology, mut cursor) = setup(&config);
        let second = *topology.slot(1).unwrap();
        let previous = Rect::new(second.x, config.margin_top, second.width, config.content_height());

        let position = continuation_position(&mut cursor, &topology, &config, previous);
        assert_eq!(position.page, 2);
        assert_eq!(position.column, 0);
        assert_eq!(position.y, config.margin_top);
    }

    #[test]
    fn test_single_column_continuation_opens_page() {
        let config = LayoutConfig::single_column();
        let (topology, mut cursor) = setup(&config);
        let previous = Rect::new(
            config.margin_left,
            config.margin_top,
            config.column_width(),
            config.content_height(),
        );
        let position = continuation_position(&mut cursor, &topology, &config, previous);
        assert_eq!(position.page, 2);
    }

    #[test]
    fn test_frame_height() {
        let config = LayoutConfig::default();
        assert!((frame_height(&config, config.margin_top) - config.content_height()).abs() < 1e-3);

        // Too little room is raised to the minimum
        let y = config.page_height - config.margin_bottom - 5.0;
        assert_eq!(frame_height(&config, y), config.min_placeable_height);

        // A page too short for the minimum keeps the real remainder
        let cramped = LayoutConfig {
            page_height: 100.0,
            margin_top: 40.0,
            margin_bottom: 45.0,
            ..LayoutConfig::default()
        };
        assert_eq!(frame_height(&cramped, 40.0), 15.0);
        assert_eq!(frame_height(&cramped, 80.0), 1.0);
    }
}
