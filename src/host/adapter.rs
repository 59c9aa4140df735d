//! Narrow wrapper the engine talks to.
//!
//! Calls whose failure has exactly one sensible reading are absorbed here
//! (and logged); everything else is returned to the engine as a `Result`.

use crate::config::TextStyle;
use crate::error::OracleError;
use crate::host::{ContentMargins, FrameId, HostOracle};
use crate::Rect;
use tracing::warn;

/// Smallest width or height a frame is created with
pub const MIN_FRAME_DIMENSION: f32 = 0.1;

pub struct OracleAdapter<'h, H: HostOracle + ?Sized> {
    host: &'h mut H,
}

impl<'h, H: HostOracle + ?Sized> OracleAdapter<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Self { host }
    }

    pub fn is_available(&self) -> bool {
        self.host.is_available()
    }

    pub fn ensure_page(&mut self, page: u32) -> Result<(), OracleError> {
        self.host.ensure_page(page)
    }

    /// Create a frame, clamping degenerate dimensions up first
    pub fn create_frame(&mut self, page: u32, rect: Rect, name: &str) -> Result<FrameId, OracleError> {
        let rect = Rect::new(
            rect.x,
            rect.y,
            rect.width.max(MIN_FRAME_DIMENSION),
            rect.height.max(MIN_FRAME_DIMENSION),
        );
        self.host.create_frame(page, rect, name)
    }

    pub fn configure_text(&mut self, frame: FrameId, style: &TextStyle) -> Result<(), OracleError> {
        self.host.configure_text(frame, style)
    }

    /// Assign text; a failed call counts as overflow
    pub fn assign_text(&mut self, frame: FrameId, text: &str) -> bool {
        match self.host.assign_text(frame, text) {
            Ok(overflowed) => overflowed,
            Err(err) => {
                warn!(%frame, error = %err, "text assignment failed, assuming overflow");
                true
            }
        }
    }

    /// Overflow query; a failed call counts as overflow
    pub fn overflows(&self, frame: FrameId) -> bool {
        match self.host.overflows(frame) {
            Ok(overflowed) => overflowed,
            Err(err) => {
                warn!(%frame, error = %err, "overflow query failed, assuming overflow");
                true
            }
        }
    }

    pub fn geometry(&self, frame: FrameId) -> Result<Rect, OracleError> {
        self.host.geometry(frame)
    }

    /// Current geometry, or `last_known` when the host cannot say
    pub fn observed_geometry(&self, frame: FrameId, last_known: Rect) -> Rect {
        match self.host.geometry(frame) {
            Ok(rect) => rect,
            Err(err) => {
                warn!(%frame, error = %err, "geometry query failed, reusing last known geometry");
                last_known
            }
        }
    }

    pub fn line_count(&self, frame: FrameId) -> Result<usize, OracleError> {
        self.host.line_count(frame)
    }

    pub fn content_margins(&self, frame: FrameId) -> Result<ContentMargins, OracleError> {
        self.host.content_margins(frame)
    }

    pub fn link(&mut self, from: FrameId, to: FrameId) -> Result<(), OracleError> {
        self.host.link(from, to)
    }

    pub fn resize(&mut self, frame: FrameId, width: f32, height: f32) -> Result<(), OracleError> {
        self.host.resize(frame, width, height)
    }

    pub fn font(&self, frame: FrameId) -> Result<String, OracleError> {
        self.host.font(frame)
    }

    pub fn available_fonts(&self) -> Result<Vec<String>, OracleError> {
        self.host.available_fonts()
    }

    pub fn set_font(&mut self, frame: FrameId, font: &str) -> Result<(), OracleError> {
        self.host.set_font(frame, font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Faults, SimulatedHost};

    #[test]
    fn test_create_clamps_degenerate_size() {
        let mut host = SimulatedHost::default();
        let mut adapter = OracleAdapter::new(&mut host);
        adapter.ensure_page(1).unwrap();
        let frame = adapter
            .create_frame(1, Rect::new(10.0, 10.0, 0.0, -4.0), "tiny")
            .unwrap();
        let rect = adapter.geometry(frame).unwrap();
        assert_eq!(rect.width, MIN_FRAME_DIMENSION);
        assert_eq!(rect.height, MIN_FRAME_DIMENSION);
    }

    #[test]
    fn test_failed_measurement_reads_as_overflow() {
        let mut host = SimulatedHost::with_faults(Faults {
            fail_measurement: true,
            ..Faults::default()
        });
        host.ensure_page(1).unwrap();
        let frame = host
            .create_frame(1, Rect::new(0.0, 0.0, 200.0, 200.0), "f")
            .unwrap();

        let adapter = OracleAdapter::new(&mut host);
        assert!(adapter.overflows(frame));
    }

    #[test]
    fn test_unknown_frame_geometry_falls_back() {
        let mut host = SimulatedHost::default();
        let adapter = OracleAdapter::new(&mut host);
        let fallback = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(adapter.observed_geometry(FrameId(99), fallback), fallback);
    }
}
