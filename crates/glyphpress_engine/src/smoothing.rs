//! Pointer smoothing.
//!
//! The smoothed position lags the raw pointer by a fixed-ratio exponential
//! ease: every frame it closes 1/15 of the remaining gap. The rule is
//! frame-rate dependent ON PURPOSE; it matches the reference behavior and
//! must not be rescaled by wall-clock delta time. Convergence is monotonic:
//! no overshoot, no oscillation, and the smoothed value never equals the raw
//! value exactly.

use glyphpress_core::Vec2;

/// Fraction of the remaining gap closed per frame.
pub const EASE_DIVISOR: f32 = 15.0;

/// Exponential easing of the raw pointer position.
///
/// Owned exclusively by the animation loop; nothing else reads or writes the
/// smoothed value.
#[derive(Debug, Clone, Copy)]
pub struct Smoother {
    /// Current smoothed position.
    smoothed: Vec2,
}

impl Smoother {
    /// Creates a smoother starting at the given position.
    #[must_use]
    pub const fn new(start: Vec2) -> Self {
        Self { smoothed: start }
    }

    /// Returns the current smoothed position.
    #[must_use]
    pub const fn value(&self) -> Vec2 {
        self.smoothed
    }

    /// Resets the smoothed position without easing.
    pub fn set_immediate(&mut self, position: Vec2) {
        self.smoothed = position;
    }

    /// Advances one frame toward the raw position and returns the result.
    pub fn advance(&mut self, raw: Vec2) -> Vec2 {
        self.smoothed = self.smoothed + (raw - self.smoothed) * (1.0 / EASE_DIVISOR);
        self.smoothed
    }
}
