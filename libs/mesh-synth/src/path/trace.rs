//! Observability hooks for the frame solver and pipe generator.

use super::Frame;
use crate::ring::Ring;

/// Receives intermediate results while a path is solved and swept.
///
/// Every method defaults to a no-op. `()` is the silent trace.
pub trait FrameTrace {
    /// Called with the miter frame of waypoint `index`.
    fn frame(&mut self, _index: usize, _frame: &Frame) {}

    /// Called with each cross-section ring, in path order.
    fn ring(&mut self, _index: usize, _ring: &Ring) {}

    /// Called after the twist fold visits joint `joint`.
    fn twist(&mut self, _joint: usize, _delta: f64, _accumulated: f64) {}
}

impl FrameTrace for () {}

/// Forwards every event to `log::trace!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl FrameTrace for LogTrace {
    fn frame(&mut self, index: usize, frame: &Frame) {
        log::trace!(
            "waypoint {index}: forward {:?} up {:?} right {:?}",
            frame.forward,
            frame.up,
            frame.right
        );
    }

    fn ring(&mut self, index: usize, ring: &Ring) {
        if let Some(first) = ring.samples().first() {
            log::trace!("ring {index}: {} samples from {:?}", ring.len(), first.position);
        }
    }

    fn twist(&mut self, joint: usize, delta: f64, accumulated: f64) {
        log::trace!("joint {joint}: twist {delta:+.6} rad, accumulated {accumulated:+.6} rad");
    }
}
