//! Host integration seams.
//!
//! The engine consumes two things from its host: live geometry (container,
//! block, and per-glyph rectangles, all in viewport coordinates) and a place
//! to apply render commands. Both sit behind [`PressureSurface`]. Frame
//! pacing sits behind [`FrameClock`] so tests can tick without sleeping.

use std::time::{Duration, Instant};

use glyphpress_core::Rect;

use crate::render::RenderCommand;

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// The host-facing rendering and measurement surface.
///
/// Geometry queries return `None` whenever the backing object is missing or
/// not yet laid out; the engine treats that as a per-frame no-op, never an
/// error. Glyph rectangles must reflect LIVE layout - prior attribute
/// changes shift boxes, so results may differ every frame.
pub trait PressureSurface {
    /// Current container rectangle.
    fn container_rect(&self) -> Option<Rect>;

    /// Current rendered text-block rectangle.
    fn block_rect(&self) -> Option<Rect>;

    /// Current rectangle of the glyph at `index`.
    fn glyph_rect(&self, index: usize) -> Option<Rect>;

    /// Applies one frame's render commands.
    fn apply(&mut self, commands: &[RenderCommand]);
}

/// Frame-pacing primitive the loop blocks on between ticks.
pub trait FrameClock {
    /// Blocks until the next frame boundary.
    fn wait_next_frame(&mut self);
}

/// Wall-clock frame pacing at the target frame rate.
#[derive(Debug)]
pub struct StdFrameClock {
    /// End of the previous frame.
    last: Instant,
    /// Frame budget.
    target: Duration,
}

impl StdFrameClock {
    /// Creates a clock at the 60 FPS target.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            target: TARGET_FRAME_TIME,
        }
    }
}

impl Default for StdFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for StdFrameClock {
    fn wait_next_frame(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.target {
            std::thread::sleep(self.target - elapsed);
        }
        self.last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_clock_paces_frames() {
        let mut clock = StdFrameClock::new();
        let start = Instant::now();
        clock.wait_next_frame();
        clock.wait_next_frame();
        // Two frames at 60Hz take at least ~33ms minus scheduler slack.
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
