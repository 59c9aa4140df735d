//! Height reclamation: shrink an item's last frame to the lines it holds

use crate::error::OracleError;
use crate::host::{ContentMargins, FrameId, HostOracle, OracleAdapter};
use crate::Rect;
use tracing::debug;

/// Heights closer than this to the current one are left alone
pub const MIN_RESIZE_DIFFERENCE: f32 = 0.1;

/// Smallest height a frame with content is shrunk to
pub fn min_effective_height(line_spacing: f32) -> f32 {
    if line_spacing > 0.0 {
        line_spacing / 2.0
    } else {
        1.0
    }
}

/// Height needed to show `lines` lines plus the frame's text insets.
///
/// A frame reporting no lines still gets one line when its source text is
/// not blank. Never returns less than 1pt.
pub fn required_height(lines: usize, margins: ContentMargins, line_spacing: f32, has_content: bool) -> f32 {
    let mut required = if lines > 0 {
        lines as f32 * line_spacing + margins.vertical()
    } else if has_content {
        line_spacing + margins.vertical()
    } else {
        margins.vertical()
    };

    if has_content && required < min_effective_height(line_spacing) {
        required = min_effective_height(line_spacing);
    }
    if required <= 0.0 {
        required = 1.0;
    }
    required
}

/// Target height for a frame currently `current` tall, if it should shrink
pub fn shrink_target(required: f32, current: f32) -> Option<f32> {
    let target = required.min(current);
    (target > 0.0 && target < current - MIN_RESIZE_DIFFERENCE).then_some(target)
}

/// Result of a reclamation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Reclaim {
    /// Nothing worth reclaiming
    Kept,
    /// Shrunk; the rect is the geometry observed afterwards
    Resized(Rect),
    /// Shrunk, but the new geometry could not be read back
    ResizedUnobserved(OracleError),
    /// Lines or insets could not be measured, or the resize was refused
    Failed(OracleError),
}

impl Reclaim {
    /// Bottom edge the column should use, given the bottom observed before
    pub fn bottom(&self, observed_bottom: f32) -> f32 {
        match self {
            Reclaim::Resized(rect) => rect.bottom(),
            _ => observed_bottom,
        }
    }
}

/// Shrink `frame` (observed at `current`) to fit its lines.
///
/// Must only be called for a frame that does not overflow.
pub fn reclaim<H: HostOracle + ?Sized>(
    oracle: &mut OracleAdapter<'_, H>,
    frame: FrameId,
    current: Rect,
    line_spacing: f32,
    has_content: bool,
) -> Reclaim {
    let lines = match oracle.line_count(frame) {
        Ok(lines) => lines,
        Err(err) => return Reclaim::Failed(err),
    };
    let margins = match oracle.content_margins(frame) {
        Ok(margins) => margins,
        Err(err) => return Reclaim::Failed(err),
    };

    let required = required_height(lines, margins, line_spacing, has_content);
    let Some(target) = shrink_target(required, current.height) else {
        return Reclaim::Kept;
    };

    debug!(%frame, lines, from = current.height, to = target, "reclaiming frame height");
    if let Err(err) = oracle.resize(frame, current.width, target) {
        return Reclaim::Failed(err);
    }

    match oracle.geometry(frame) {
        Ok(rect) => Reclaim::Resized(rect),
        Err(err) => Reclaim::ResizedUnobserved(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextStyle;
    use crate::host::{Faults, SimulatedHost};

    #[test]
    fn test_required_height() {
        let none = ContentMargins::default();
        assert_eq!(required_height(3, none, 10.0, true), 30.0);
        assert_eq!(required_height(3, ContentMargins::new(2.0, 3.0), 10.0, true), 35.0);
        // No lines reported but there is text: one line
        assert_eq!(required_height(0, none, 10.0, true), 10.0);
        // Blank frame: insets only, and never below 1pt
        assert_eq!(required_height(0, ContentMargins::new(2.0, 2.0), 10.0, false), 4.0);
        assert_eq!(required_height(0, none, 10.0, false), 1.0);
    }

    #[test]
    fn test_min_effective_height() {
        assert_eq!(min_effective_height(16.8), 8.4);
        assert_eq!(min_effective_height(0.0), 1.0);
        assert_eq!(required_height(0, ContentMargins::default(), 0.0, true), 1.0);
    }

    #[test]
    fn test_shrink_target() {
        assert_eq!(shrink_target(30.0, 100.0), Some(30.0));
        // Never grows a frame
        assert_eq!(shrink_target(120.0, 100.0), None);
        // Differences up to 0.1pt are ignored
        assert_eq!(shrink_target(99.95, 100.0), None);
    }

    fn roomy_frame(host: &mut SimulatedHost) -> (FrameId, Rect) {
        host.ensure_page(1).unwrap();
        let rect = Rect::new(0.0, 50.0, 40.0, 200.0);
        let frame = host.create_frame(1, rect, "f").unwrap();
        host.configure_text(frame, &TextStyle::new(10.0, 10.0)).unwrap();
        host.assign_text(frame, "Hello World again").unwrap();
        (frame, rect)
    }

    #[test]
    fn test_reclaim_shrinks_to_lines() {
        let mut host = SimulatedHost::default();
        let (frame, rect) = roomy_frame(&mut host);
        let mut oracle = OracleAdapter::new(&mut host);

        let outcome = reclaim(&mut oracle, frame, rect, 10.0, true);
        assert_eq!(outcome, Reclaim::Resized(Rect::new(0.0, 50.0, 40.0, 30.0)));
        assert_eq!(outcome.bottom(250.0), 80.0);
    }

    #[test]
    fn test_reclaim_keeps_tight_frame() {
        let mut host = SimulatedHost::default();
        let (frame, _) = roomy_frame(&mut host);
        host.resize(frame, 40.0, 30.0).unwrap();
        let mut oracle = OracleAdapter::new(&mut host);

        let outcome = reclaim(&mut oracle, frame, Rect::new(0.0, 50.0, 40.0, 30.0), 10.0, true);
        assert_eq!(outcome, Reclaim::Kept);
    }

    #[test]
    fn test_reclaim_resize_refused() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_resize: true,
            ..Faults::default()
        });
        let (frame, rect) = roomy_frame(&mut host);
        let mut oracle = OracleAdapter::new(&mut host);

        let outcome = reclaim(&mut oracle, frame, rect, 10.0, true);
        assert!(matches!(outcome, Reclaim::Failed(OracleError::Resize { .. })));
        assert_eq!(outcome.bottom(250.0), 250.0);
    }

    #[test]
    fn test_reclaim_unobserved_keeps_previous_bottom() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_geometry_after_resize: true,
            ..Faults::default()
        });
        let (frame, rect) = roomy_frame(&mut host);
        let mut oracle = OracleAdapter::new(&mut host);

        let outcome = reclaim(&mut oracle, frame, rect, 10.0, true);
        assert!(matches!(outcome, Reclaim::ResizedUnobserved(_)));
        assert_eq!(outcome.bottom(250.0), 250.0);
    }

    #[test]
    fn test_reclaim_measurement_failure() {
        let mut host = SimulatedHost::default();
        let (frame, rect) = roomy_frame(&mut host);
        host.faults_mut().fail_measurement = true;
        let mut oracle = OracleAdapter::new(&mut host);

        let outcome = reclaim(&mut oracle, frame, rect, 10.0, true);
        assert!(matches!(outcome, Reclaim::Failed(OracleError::Measurement { .. })));
    }
}
