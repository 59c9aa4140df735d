//! Frame placement across columns and pages

pub mod cursor;
mod engine;
pub mod font;
mod placement;
mod plan;
pub mod reclaim;
mod topology;

pub use cursor::{ColumnState, LayoutCursor, LayoutPosition};
pub use engine::{paginate, Engine};
pub use font::find_bold_variant;
pub use placement::{continuation_position, first_position, frame_height, space_before};
pub use plan::{ItemRecord, ItemStatus, LayoutPlan, LayoutWarning, PlacedFrame};
pub use reclaim::{required_height, Reclaim};
pub use topology::{ColumnSlot, ColumnTopology};
