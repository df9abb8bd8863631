//! Block fitting.
//!
//! Fitting runs on mount, on text change, and on container resize. It is
//! split in two phases because the height measurement is only valid after
//! the new base font size has taken visual effect:
//!
//! - Phase A: pick the base font size from container width and glyph count,
//!   reset vertical scale and line height to 1, apply.
//! - Phase B (next frame, vertical-fit only): measure the rendered block
//!   height and derive the vertical scale.
//!
//! Phase B never runs synchronously inside a resize notification.

use glyphpress_core::Rect;

/// Pure fitting math, parameterized by configuration.
#[derive(Debug, Clone, Copy)]
pub struct LayoutFitter {
    /// Lower clamp for the base font size.
    min_font_size: f32,
    /// Whether phase B (vertical-fit) runs at all.
    vertical_fit: bool,
}

impl LayoutFitter {
    /// Creates a fitter.
    #[must_use]
    pub const fn new(min_font_size: f32, vertical_fit: bool) -> Self {
        Self {
            min_font_size,
            vertical_fit,
        }
    }

    /// Returns true when fitting includes the vertical phase.
    #[must_use]
    pub const fn vertical_fit(&self) -> bool {
        self.vertical_fit
    }

    /// Phase A: base font size from container width and glyph count.
    ///
    /// `base = max(min_font_size, width / (count / 2))`. A zero glyph count
    /// has no width to divide by and falls back to the minimum.
    #[must_use]
    pub fn base_font_size(&self, container_width: f32, glyph_count: usize) -> f32 {
        if glyph_count == 0 {
            return self.min_font_size;
        }
        let fitted = container_width / (glyph_count as f32 / 2.0);
        fitted.max(self.min_font_size)
    }

    /// Phase B: vertical scale from measured block height.
    ///
    /// Only a strictly positive measured height AND container height produce
    /// a new scale; any degenerate measurement keeps `previous` (no NaN, no
    /// zero-collapse).
    #[must_use]
    pub fn vertical_scale(
        &self,
        container_height: f32,
        measured_height: f32,
        previous: f32,
    ) -> f32 {
        if self.vertical_fit && measured_height > 0.0 && container_height > 0.0 {
            container_height / measured_height
        } else {
            previous
        }
    }
}

/// A fit waiting for its phase-B measurement.
///
/// Created when phase A is applied; consumed on a LATER frame, after the
/// sizing change has reached the surface. `prev_scale` is the scale to keep
/// if the measurement turns out degenerate.
#[derive(Debug, Clone, Copy)]
pub struct PendingFit {
    /// Vertical scale in effect before phase A reset it.
    pub prev_scale: f32,
    /// True until one frame boundary has passed.
    pub fresh: bool,
}

impl PendingFit {
    /// Creates a pending fit armed for the next frame.
    #[must_use]
    pub const fn new(prev_scale: f32) -> Self {
        Self {
            prev_scale,
            fresh: true,
        }
    }

    /// Returns true once the paint boundary has passed and measurement may
    /// run; first call only marks the fit as no longer fresh.
    pub fn ready(&mut self) -> bool {
        if self.fresh {
            self.fresh = false;
            return false;
        }
        true
    }
}

/// Measures a block rectangle's height, if geometry is available.
#[must_use]
pub fn measured_height(block_rect: Option<Rect>) -> f32 {
    block_rect.map_or(0.0, |rect| rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font_size_rule() {
        let fitter = LayoutFitter::new(24.0, false);

        // Example from the sizing rule: "AB" in a 400px container.
        assert_eq!(fitter.base_font_size(400.0, 2), 400.0);
        // Wide text clamps to the minimum.
        assert_eq!(fitter.base_font_size(100.0, 40), 24.0);
        // Zero glyphs fall back to the minimum.
        assert_eq!(fitter.base_font_size(400.0, 0), 24.0);
    }

    #[test]
    fn test_vertical_scale_happy_path() {
        let fitter = LayoutFitter::new(24.0, true);
        assert_eq!(fitter.vertical_scale(400.0, 200.0, 1.0), 2.0);
    }

    #[test]
    fn test_vertical_scale_degenerate_keeps_previous() {
        let fitter = LayoutFitter::new(24.0, true);

        // Zero measured height
        assert_eq!(fitter.vertical_scale(400.0, 0.0, 1.5), 1.5);
        // Zero container height
        assert_eq!(fitter.vertical_scale(0.0, 200.0, 1.5), 1.5);
        // Vertical fit disabled entirely
        let flat = LayoutFitter::new(24.0, false);
        assert_eq!(flat.vertical_scale(400.0, 200.0, 1.0), 1.0);
    }

    #[test]
    fn test_pending_fit_waits_one_frame() {
        let mut pending = PendingFit::new(1.25);
        assert!(!pending.ready());
        assert!(pending.ready());
        assert_eq!(pending.prev_scale, 1.25);
    }
}
