//! Placement engine: drives the host through every item of a run

use crate::config::{LayoutConfig, TextStyle};
use crate::document::{Content, ContentItem};
use crate::error::{LayoutError, OracleError};
use crate::host::{FrameId, HostOracle, OracleAdapter};
use crate::layout::cursor::{LayoutCursor, LayoutPosition};
use crate::layout::font::{family_name, find_bold_variant};
use crate::layout::placement;
use crate::layout::plan::{ItemRecord, ItemStatus, LayoutPlan, LayoutWarning, PlacedFrame};
use crate::layout::reclaim::{self, Reclaim};
use crate::layout::topology::ColumnTopology;
use crate::Rect;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

/// A frame just created on the host
#[derive(Debug, Clone)]
struct NewFrame {
    id: FrameId,
    name: String,
    position: LayoutPosition,
    requested: Rect,
}

/// Last linked frame of the chain being built
#[derive(Debug, Clone, Copy)]
struct ChainTail {
    id: FrameId,
    rect: Rect,
    column: usize,
    plan_index: usize,
}

/// Places content items into frames on a host.
///
/// One engine performs one run; [`Engine::run`] consumes it.
pub struct Engine<'h, H: HostOracle + ?Sized> {
    oracle: OracleAdapter<'h, H>,
    config: LayoutConfig,
    topology: ColumnTopology,
    cursor: LayoutCursor,
    /// Installed fonts, queried once on first use
    fonts: Option<Vec<String>>,
    plan: LayoutPlan,
}

impl<'h, H: HostOracle + ?Sized> Engine<'h, H> {
    /// Validate the configuration and check the host can be driven
    pub fn new(host: &'h mut H, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        if !host.is_available() {
            return Err(LayoutError::HostUnavailable);
        }

        let topology = config.topology();
        let cursor = LayoutCursor::new(&topology, config.margin_top);
        let plan = LayoutPlan::new(config.mode);

        Ok(Self {
            oracle: OracleAdapter::new(host),
            config,
            topology,
            cursor,
            fonts: None,
            plan,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn topology(&self) -> &ColumnTopology {
        &self.topology
    }

    /// Place every item in order and return what was done
    pub fn run(mut self, items: &[ContentItem]) -> LayoutPlan {
        info!(
            items = items.len(),
            mode = ?self.config.mode,
            "starting layout"
        );

        self.plan.sections = items
            .iter()
            .map(|item| item.section_index)
            .collect::<FxHashSet<_>>()
            .len();

        for (index, item) in items.iter().enumerate() {
            self.place_item(index, item);
        }

        self.plan.pages = self.plan.frames.iter().map(|f| f.page).max().unwrap_or(0);
        info!(summary = %self.plan.summary(), "layout finished");
        self.plan
    }

    fn place_item(&mut self, index: usize, item: &ContentItem) {
        let previous_section = self.cursor.enter_section(item.section_index);
        let space = placement::space_before(previous_section, item.section_index, &self.config);
        let item_name = item.name_base();

        let mut record = ItemRecord {
            index,
            name: item_name.clone(),
            kind: item.kind,
            section_index: item.section_index,
            status: ItemStatus::Complete,
            frames: Vec::new(),
            overflowing: false,
        };

        if !item.has_content() {
            record.status = ItemStatus::Skipped;
            self.record_warning(LayoutWarning::ItemSkipped {
                item: item_name,
                reason: "blank text".to_string(),
            });
            self.plan.items.push(record);
            return;
        }

        let style = *item.kind.style(&self.config);
        let text = item.prepared_text(&self.config);

        // First frame
        let position =
            placement::first_position(&mut self.cursor, &self.topology, &self.config, space);
        let first = match self.create_frame(item, 0, position, &style) {
            Ok(frame) => frame,
            Err(err) => {
                record.status = ItemStatus::Skipped;
                self.record_warning(LayoutWarning::ItemSkipped {
                    item: item_name,
                    reason: err.to_string(),
                });
                self.plan.items.push(record);
                return;
            }
        };

        let mut overflowing = self.oracle.assign_text(first.id, &text);
        if item.kind.is_title() {
            self.embolden(&item_name, &first);
            overflowing = self.oracle.overflows(first.id);
        }

        let observed = self.oracle.observed_geometry(first.id, first.requested);
        self.cursor.set_bottom(position.column, observed.bottom());
        let plan_index = self.push_frame(index, item, 0, &first, observed, None, false);
        record.frames.push(plan_index);

        let mut tail = ChainTail {
            id: first.id,
            rect: observed,
            column: position.column,
            plan_index,
        };

        // Overflow chain
        while overflowing {
            if record.frames.len() >= self.config.max_chain_frames {
                record.status = ItemStatus::CapReached;
                self.record_warning(LayoutWarning::ChainCapReached {
                    item: item_name.clone(),
                    frames: record.frames.len(),
                });
                break;
            }

            let chain_index = record.frames.len();
            let position = placement::continuation_position(
                &mut self.cursor,
                &self.topology,
                &self.config,
                tail.rect,
            );
            debug!(
                item = %item_name,
                chain_index,
                page = position.page,
                column = position.column,
                y = position.y,
                "continuing overflow"
            );

            let frame = match self.create_frame(item, chain_index, position, &style) {
                Ok(frame) => frame,
                Err(err) => {
                    record.status = ItemStatus::Truncated;
                    self.record_warning(LayoutWarning::ChainTruncated {
                        item: item_name.clone(),
                        reason: err.to_string(),
                    });
                    break;
                }
            };
            if item.kind.is_title() {
                self.embolden(&item_name, &frame);
            }

            let linked = self.oracle.link(tail.id, frame.id);
            let observed = self.oracle.observed_geometry(frame.id, frame.requested);
            // Advance even for an unlinked frame so nothing lands on top of it
            self.cursor.set_bottom(position.column, observed.bottom());

            if let Err(err) = linked {
                let orphan = self.push_frame(index, item, chain_index, &frame, observed, None, true);
                record.frames.push(orphan);
                record.status = ItemStatus::Truncated;
                self.record_warning(LayoutWarning::FrameOrphaned {
                    item: item_name.clone(),
                    frame: frame.name.clone(),
                    reason: err.to_string(),
                });
                break;
            }

            let plan_index =
                self.push_frame(index, item, chain_index, &frame, observed, Some(tail.id), false);
            record.frames.push(plan_index);
            tail = ChainTail {
                id: frame.id,
                rect: observed,
                column: position.column,
                plan_index,
            };
            overflowing = self.oracle.overflows(frame.id);
        }
        record.overflowing = overflowing;

        if !overflowing {
            self.reclaim_tail(&item_name, item, tail, style.line_spacing);
        }

        debug!(
            item = %item_name,
            frames = record.frames.len(),
            status = ?record.status,
            "item placed"
        );
        self.plan.items.push(record);
    }

    /// Shrink the last frame of a finished chain and move its column up
    fn reclaim_tail(&mut self, item_name: &str, item: &ContentItem, tail: ChainTail, line_spacing: f32) {
        let outcome = reclaim::reclaim(
            &mut self.oracle,
            tail.id,
            tail.rect,
            line_spacing,
            item.has_content(),
        );
        self.cursor
            .set_bottom(tail.column, outcome.bottom(tail.rect.bottom()));

        let frame_name = self.plan.frames[tail.plan_index].name.clone();
        match outcome {
            Reclaim::Kept => {}
            Reclaim::Resized(rect) => {
                let placed = &mut self.plan.frames[tail.plan_index];
                placed.rect = rect;
                placed.reclaimed = true;
            }
            Reclaim::ResizedUnobserved(err) => {
                self.plan.frames[tail.plan_index].reclaimed = true;
                self.record_warning(LayoutWarning::ReclaimFailed {
                    item: item_name.to_string(),
                    frame: frame_name,
                    reason: err.to_string(),
                });
            }
            Reclaim::Failed(err) => {
                self.record_warning(LayoutWarning::ReclaimFailed {
                    item: item_name.to_string(),
                    frame: frame_name,
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Create and style a frame at `position`
    fn create_frame(
        &mut self,
        item: &ContentItem,
        chain_index: usize,
        position: LayoutPosition,
        style: &TextStyle,
    ) -> Result<NewFrame, OracleError> {
        self.oracle.ensure_page(position.page)?;

        let requested = placement::frame_rect(&self.topology, &self.config, &position);
        let name = item.frame_name(position.page, chain_index, position.column);
        let id = self.oracle.create_frame(position.page, requested, &name)?;
        debug!(
            frame = %name,
            page = position.page,
            column = position.column,
            y = requested.y,
            height = requested.height,
            "created frame"
        );

        let frame = NewFrame {
            id,
            name,
            position,
            requested,
        };
        if let Err(err) = self.oracle.configure_text(id, style) {
            self.style_failed(&item.name_base(), &frame, err);
        }
        Ok(frame)
    }

    /// Switch a title frame to a bold variant of its font, if one is installed
    fn embolden(&mut self, item_name: &str, frame: &NewFrame) {
        let current = match self.oracle.font(frame.id) {
            Ok(font) => font,
            Err(err) => {
                self.style_failed(item_name, frame, err);
                return;
            }
        };

        let family = family_name(&current);
        if let Err(err) = self.load_fonts() {
            self.style_failed(item_name, frame, err);
            return;
        }
        let fonts = self.fonts.as_deref().unwrap_or_default();
        let Some(bold) = find_bold_variant(&family, fonts) else {
            debug!(frame = %frame.name, family = %family, "no bold variant installed");
            return;
        };
        if bold == current {
            return;
        }

        match self.oracle.set_font(frame.id, &bold) {
            Ok(()) => debug!(frame = %frame.name, font = %bold, "applied bold font"),
            Err(err) => self.style_failed(item_name, frame, err),
        }
    }

    /// Query the installed fonts on first use.
    ///
    /// A failed query is reported once; later titles see an empty list.
    fn load_fonts(&mut self) -> Result<(), OracleError> {
        if self.fonts.is_some() {
            return Ok(());
        }
        match self.oracle.available_fonts() {
            Ok(fonts) => {
                self.fonts = Some(fonts);
                Ok(())
            }
            Err(err) => {
                self.fonts = Some(Vec::new());
                Err(err)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_frame(
        &mut self,
        item_index: usize,
        item: &ContentItem,
        chain_index: usize,
        frame: &NewFrame,
        rect: Rect,
        linked_from: Option<FrameId>,
        orphaned: bool,
    ) -> usize {
        self.plan.frames.push(PlacedFrame {
            id: frame.id,
            name: frame.name.clone(),
            item: item_index,
            kind: item.kind,
            chain_index,
            page: frame.position.page,
            column: frame.position.column,
            rect,
            linked_from,
            orphaned,
            reclaimed: false,
        });
        self.plan.frames.len() - 1
    }

    fn style_failed(&mut self, item_name: &str, frame: &NewFrame, err: OracleError) {
        self.record_warning(LayoutWarning::StyleFailed {
            item: item_name.to_string(),
            frame: frame.name.clone(),
            reason: err.to_string(),
        });
    }

    fn record_warning(&mut self, warning: LayoutWarning) {
        warn!("{}", warning);
        self.plan.warnings.push(warning);
    }
}

/// Lay out loaded content on `host` in one call
pub fn paginate<H: HostOracle + ?Sized>(
    host: &mut H,
    config: LayoutConfig,
    content: &Content,
) -> Result<LayoutPlan, LayoutError> {
    let engine = Engine::new(host, config)?;
    let mut plan = engine.run(&content.items());
    plan.sections = content.section_count();
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnMode;
    use crate::document::Section;
    use crate::host::{Faults, FontLibrary, FontMetrics, SimulatedHost, DEFAULT_FONT};

    /// 200pt square page, 20pt margins, two 75pt columns holding 16 lines of
    /// 15 five-point glyphs each
    fn small_config() -> LayoutConfig {
        LayoutConfig {
            mode: ColumnMode::Double,
            page_width: 200.0,
            page_height: 200.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            margin_left: 20.0,
            margin_right: 20.0,
            column_gap: 10.0,
            item_gap: 5.0,
            section_gap: 10.0,
            min_placeable_height: 20.0,
            min_column_width: 10.0,
            title: TextStyle::new(10.0, 10.0),
            paragraph: TextStyle::new(10.0, 10.0),
            paragraph_indent: String::new(),
            max_chain_frames: 100,
        }
    }

    /// Text that breaks into exactly `n` lines in a 75pt column
    fn lines_of(n: usize) -> String {
        vec!["abcdefghijklmn"; n].join(" ")
    }

    fn para(text: impl Into<String>, section: usize, index: usize) -> ContentItem {
        ContentItem::paragraph(text, section, index)
    }

    fn run(host: &mut SimulatedHost, config: LayoutConfig, items: &[ContentItem]) -> LayoutPlan {
        Engine::new(host, config).unwrap().run(items)
    }

    #[test]
    fn test_short_paragraphs_stack_in_first_column() {
        let mut host = SimulatedHost::default();
        let items: Vec<_> = (0..4).map(|i| para("short", 0, i)).collect();
        let plan = run(&mut host, small_config(), &items);

        assert_eq!(plan.frame_count(), 4);
        assert!(plan.is_clean());
        let ys: Vec<f32> = plan.frames.iter().map(|f| f.rect.y).collect();
        assert_eq!(ys, vec![20.0, 35.0, 50.0, 65.0]);
        for frame in &plan.frames {
            assert_eq!(frame.page, 1);
            assert_eq!(frame.column, 0);
            assert!(frame.reclaimed);
            assert_eq!(frame.rect.height, 10.0);
        }
        assert_eq!(plan.frames[2].name, "sec1_x3_p1_f1_c1");
    }

    #[test]
    fn test_section_change_adds_section_gap() {
        let mut host = SimulatedHost::default();
        let items = vec![
            ContentItem::title("Intro", 0),
            para("body", 0, 0),
            ContentItem::title("Next", 1),
        ];
        let plan = run(&mut host, small_config(), &items);

        let ys: Vec<f32> = plan.frames.iter().map(|f| f.rect.y).collect();
        // 20..30, +5 -> 35..45, +10+5 -> 60
        assert_eq!(ys, vec![20.0, 35.0, 60.0]);
        assert_eq!(plan.sections, 2);
    }

    #[test]
    fn test_overflow_continues_in_second_column() {
        let mut host = SimulatedHost::default();
        let items = vec![para("short", 0, 0), para(lines_of(20), 0, 1)];
        let plan = run(&mut host, small_config(), &items);

        let chain: Vec<_> = plan.frames_for_item(1).collect();
        assert_eq!(chain.len(), 2);
        // 145pt left under the first item: 14 lines
        assert_eq!(chain[0].rect.y, 35.0);
        assert_eq!(chain[0].column, 0);
        assert!(!chain[0].reclaimed);
        assert_eq!(chain[1].column, 1);
        assert_eq!(chain[1].page, 1);
        assert_eq!(chain[1].rect.x, 105.0);
        assert_eq!(chain[1].rect.y, 20.0);
        assert_eq!(chain[1].linked_from, Some(chain[0].id));
        // Six remaining lines
        assert!(chain[1].reclaimed);
        assert_eq!(chain[1].rect.height, 60.0);
        assert_eq!(plan.items[1].status, ItemStatus::Complete);

        let info = host.frame_named(&chain[1].name).unwrap();
        assert_eq!(info.lines, 6);
        assert!(!info.overflow);
    }

    #[test]
    fn test_single_column_overflow_opens_new_page() {
        let mut host = SimulatedHost::default();
        let config = LayoutConfig {
            mode: ColumnMode::Single,
            ..small_config()
        };
        // Two words per 160pt line
        let items = vec![para("short", 0, 0), para(lines_of(40), 0, 1)];
        let plan = run(&mut host, config, &items);

        let chain: Vec<_> = plan.frames_for_item(1).collect();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].page, 1);
        assert_eq!(chain[1].page, 2);
        assert_eq!(chain[1].column, 0);
        assert_eq!(chain[1].rect.y, 20.0);
        assert_eq!(chain[1].name, "sec1_x2_p2_f2_c1");
        assert_eq!(host.page_count(), 2);
        assert_eq!(plan.pages, 2);
    }

    #[test]
    fn test_full_columns_open_new_page_without_gap() {
        let mut host = SimulatedHost::default();
        let items = vec![para(lines_of(32), 0, 0), para("after", 0, 1)];
        let plan = run(&mut host, small_config(), &items);

        let chain: Vec<_> = plan.frames_for_item(0).collect();
        assert_eq!(chain.len(), 2);
        // Exactly full: nothing to reclaim
        assert!(!chain[1].reclaimed);
        assert_eq!(chain[1].rect.height, 160.0);

        let next = plan.frames_for_item(1).next().unwrap();
        assert_eq!(next.page, 2);
        assert_eq!(next.column, 0);
        assert_eq!(next.rect.y, 20.0);
    }

    #[test]
    fn test_chain_stops_at_cap() {
        let mut host = SimulatedHost::with_faults(Faults {
            force_overflow: true,
            ..Faults::default()
        });
        let config = LayoutConfig {
            max_chain_frames: 3,
            ..small_config()
        };
        let plan = run(&mut host, config, &[para("endless", 0, 0)]);

        assert_eq!(plan.frame_count(), 3);
        assert_eq!(plan.items[0].status, ItemStatus::CapReached);
        assert!(plan.items[0].overflowing);
        assert!(plan.frames.iter().all(|f| !f.reclaimed));
        assert_eq!(
            plan.warnings,
            vec![LayoutWarning::ChainCapReached {
                item: "sec1_x1".to_string(),
                frames: 3,
            }]
        );
        // Column 1, column 2, then a new page
        let pages: Vec<u32> = plan.frames.iter().map(|f| f.page).collect();
        assert_eq!(pages, vec![1, 1, 2]);
    }

    #[test]
    fn test_failed_measurement_is_treated_as_overflow() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_measurement: true,
            ..Faults::default()
        });
        let config = LayoutConfig {
            max_chain_frames: 2,
            ..small_config()
        };
        let plan = run(&mut host, config, &[para("tiny", 0, 0)]);

        assert_eq!(plan.frame_count(), 2);
        assert_eq!(plan.items[0].status, ItemStatus::CapReached);
        assert!(plan.frames.iter().all(|f| !f.reclaimed));
    }

    #[test]
    fn test_first_frame_failure_skips_item() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_create: vec!["sec1_x1_".to_string()],
            ..Faults::default()
        });
        let items = vec![para("lost", 0, 0), para("kept", 0, 1)];
        let plan = run(&mut host, small_config(), &items);

        assert_eq!(plan.items[0].status, ItemStatus::Skipped);
        assert!(plan.items[0].frames.is_empty());
        assert!(matches!(plan.warnings[0], LayoutWarning::ItemSkipped { .. }));
        // The skipped item still counts for spacing
        assert_eq!(plan.frames[0].rect.y, 25.0);
        assert_eq!(host.frame_count(), 1);
    }

    #[test]
    fn test_continuation_failure_truncates_chain() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_create: vec!["_f2_".to_string()],
            ..Faults::default()
        });
        let plan = run(&mut host, small_config(), &[para(lines_of(20), 0, 0)]);

        assert_eq!(plan.frame_count(), 1);
        assert_eq!(plan.items[0].status, ItemStatus::Truncated);
        assert!(plan.items[0].overflowing);
        assert!(!plan.frames[0].reclaimed);
        assert!(matches!(plan.warnings[0], LayoutWarning::ChainTruncated { .. }));
    }

    #[test]
    fn test_link_failure_leaves_orphan_that_blocks_its_column() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_link: true,
            ..Faults::default()
        });
        let items = vec![para(lines_of(20), 0, 0), para("next", 0, 1)];
        let plan = run(&mut host, small_config(), &items);

        let chain: Vec<_> = plan.frames_for_item(0).collect();
        assert_eq!(chain.len(), 2);
        assert!(chain[1].orphaned);
        assert_eq!(chain[1].linked_from, None);
        assert_eq!(chain[1].column, 1);
        assert_eq!(plan.items[0].status, ItemStatus::Truncated);
        assert!(plan.items[0].overflowing);
        assert!(host.info(chain[1].id).unwrap().prev.is_none());

        // Both columns are taken, so the next item starts a page
        let next = plan.frames_for_item(1).next().unwrap();
        assert_eq!(next.page, 2);
        assert!(matches!(plan.warnings[0], LayoutWarning::FrameOrphaned { .. }));
    }

    #[test]
    fn test_resize_failure_keeps_frame_height() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_resize: true,
            ..Faults::default()
        });
        let items = vec![para("one", 0, 0), para("two", 0, 1)];
        let plan = run(&mut host, small_config(), &items);

        assert_eq!(plan.frames[0].rect.height, 160.0);
        assert!(!plan.frames[0].reclaimed);
        // Column 1 is still full
        assert_eq!(plan.frames[1].column, 1);
        assert_eq!(plan.frames[1].rect.y, 25.0);
        assert!(matches!(plan.warnings[0], LayoutWarning::ReclaimFailed { .. }));
    }

    #[test]
    fn test_unreadable_geometry_after_resize_keeps_previous_bottom() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_geometry_after_resize: true,
            ..Faults::default()
        });
        let items = vec![para("one", 0, 0), para("two", 0, 1)];
        let plan = run(&mut host, small_config(), &items);

        assert!(plan.frames[0].reclaimed);
        assert_eq!(plan.frames[1].column, 1);
        // The host did shrink it
        assert_eq!(host.frames()[0].rect.height, 10.0);
    }

    #[test]
    fn test_titles_are_bold() {
        let mut host = SimulatedHost::default();
        let plan = run(&mut host, small_config(), &[ContentItem::title("Heading", 0)]);

        let info = host.frame_named(&plan.frames[0].name).unwrap();
        assert_eq!(info.font, "Liberation Serif Bold");
        assert_eq!(plan.frames[0].name, "sec1_t1_p1_f1_c1");
        assert!(plan.is_clean());
    }

    #[test]
    fn test_missing_bold_variant_is_not_a_warning() {
        let mut library = FontLibrary::empty();
        library.add(DEFAULT_FONT, FontMetrics::uniform(0.5));
        let mut host = SimulatedHost::new(library);
        let plan = run(&mut host, small_config(), &[ContentItem::title("Heading", 0)]);

        assert_eq!(plan.frame_count(), 1);
        assert_eq!(host.frames()[0].font, DEFAULT_FONT);
        assert!(plan.is_clean());
    }

    #[test]
    fn test_title_continuations_are_bold() {
        let mut host = SimulatedHost::default();
        let plan = run(&mut host, small_config(), &[ContentItem::title(lines_of(20), 0)]);

        assert!(plan.frame_count() >= 2);
        assert_eq!(plan.items[0].status, ItemStatus::Complete);
        for frame in &plan.frames {
            let info = host.frame_named(&frame.name).unwrap();
            assert_eq!(info.font, "Liberation Serif Bold");
        }
        for pair in plan.frames.windows(2) {
            assert_eq!(pair[1].linked_from, Some(pair[0].id));
        }
        assert!(plan.frames.last().unwrap().reclaimed);
        assert!(plan.is_clean());
    }

    #[test]
    fn test_font_list_failure_is_reported_once() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_font_list: true,
            ..Faults::default()
        });
        let items = vec![ContentItem::title("One", 0), ContentItem::title("Two", 1)];
        let plan = run(&mut host, small_config(), &items);

        assert_eq!(plan.frame_count(), 2);
        assert_eq!(plan.warnings.len(), 1);
        assert!(matches!(plan.warnings[0], LayoutWarning::StyleFailed { .. }));
        assert!(host.frames().iter().all(|f| f.font == DEFAULT_FONT));
    }

    #[test]
    fn test_style_failures_only_warn() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_styling: true,
            ..Faults::default()
        });
        let plan = run(&mut host, small_config(), &[ContentItem::title("Heading", 0)]);

        assert_eq!(plan.frame_count(), 1);
        assert_eq!(plan.items[0].status, ItemStatus::Complete);
        assert!(plan
            .warnings
            .iter()
            .all(|w| matches!(w, LayoutWarning::StyleFailed { .. })));
        assert!(!plan.warnings.is_empty());
    }

    #[test]
    fn test_frames_follow_item_order() {
        let mut host = SimulatedHost::default();
        let items = vec![
            para(lines_of(20), 0, 0),
            para("b", 0, 1),
            para(lines_of(3), 0, 2),
        ];
        let plan = run(&mut host, small_config(), &items);

        let owners: Vec<usize> = plan.frames.iter().map(|f| f.item).collect();
        assert!(owners.windows(2).all(|w| w[0] <= w[1]));
        let ids: Vec<u64> = plan.frames.iter().map(|f| f.id.0).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unavailable_host_is_fatal() {
        let mut host = SimulatedHost::with_faults(Faults {
            unavailable: true,
            ..Faults::default()
        });
        assert!(matches!(
            Engine::new(&mut host, small_config()),
            Err(LayoutError::HostUnavailable)
        ));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut host = SimulatedHost::default();
        let config = LayoutConfig {
            max_chain_frames: 0,
            ..small_config()
        };
        assert!(matches!(
            Engine::new(&mut host, config),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_paginate_content() {
        let mut host = SimulatedHost::default();
        let content = Content::new(vec![
            Section::new(Some("One"), &["alpha", "beta"]),
            Section::new(None, &["  "]),
            Section::new(Some("Two"), &["gamma"]),
        ]);
        let plan = paginate(&mut host, small_config(), &content).unwrap();

        assert_eq!(plan.sections, 2);
        assert_eq!(plan.items.len(), 5);
        assert_eq!(plan.frame_count(), 5);
        assert_eq!(host.frame_count(), 5);
        assert!(plan.frames.iter().all(|f| f.column == 0 && f.chain_index == 0));
        assert!(plan.frames.iter().all(|f| f.page == 1));
        assert_eq!(plan.summary(), "2 sections, 5 items, 5 frames, 1 pages, 0 warnings");
    }
}
