//! Distance-to-attribute mapping.
//!
//! For each glyph, the Euclidean distance from its bounding-box center to
//! the smoothed pointer is folded through a linear falloff: zero distance
//! yields the axis maximum, `max_distance` (half the rendered block width)
//! or more yields the minimum. Values are clamped into the axis range and
//! rounded per axis policy. Disabled axes always report their constant
//! fallback regardless of distance.

use glyphpress_core::{Axis, AxisRange, Vec2};

use crate::glyph::GlyphAttributes;

/// Which attribute axes react to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisToggles {
    /// Stretch (width) axis enabled.
    pub width: bool,
    /// Weight (boldness) axis enabled.
    pub weight: bool,
    /// Slant (italic) axis enabled.
    pub italic: bool,
    /// Opacity (alpha) axis enabled.
    pub alpha: bool,
}

impl Default for AxisToggles {
    /// Stock preset: width/weight/italic on, alpha off.
    fn default() -> Self {
        Self {
            width: true,
            weight: true,
            italic: true,
            alpha: false,
        }
    }
}

/// Maps per-glyph pointer distance to attribute values.
#[derive(Debug, Clone, Copy)]
pub struct AttributeMapper {
    /// Enabled axes.
    toggles: AxisToggles,
}

impl AttributeMapper {
    /// Creates a mapper with the given toggles.
    #[must_use]
    pub const fn new(toggles: AxisToggles) -> Self {
        Self { toggles }
    }

    /// Linear falloff into an axis range, clamped.
    ///
    /// A non-positive `max_distance` means the layout degenerated to a
    /// single point; every glyph is treated as at zero distance (full
    /// effect) rather than dividing by zero.
    #[must_use]
    pub fn interpolate(distance: f32, max_distance: f32, range: AxisRange) -> f32 {
        if max_distance <= 0.0 {
            return range.max;
        }
        let raw = (range.max - (range.max * distance / max_distance).abs()) + range.min;
        range.clamp(raw)
    }

    /// Computes one axis value, honoring its toggle and rounding policy.
    fn axis_value(&self, axis: Axis, enabled: bool, distance: f32, max_distance: f32) -> f32 {
        if !enabled {
            return axis.fallback();
        }
        axis.rounding()
            .apply(Self::interpolate(distance, max_distance, axis.range()))
    }

    /// Maps a glyph center against the smoothed pointer position.
    #[must_use]
    pub fn map(&self, glyph_center: Vec2, pointer: Vec2, max_distance: f32) -> GlyphAttributes {
        let distance = glyph_center.distance(pointer);
        GlyphAttributes {
            stretch: self.axis_value(Axis::Stretch, self.toggles.width, distance, max_distance),
            weight: self.axis_value(Axis::Weight, self.toggles.weight, distance, max_distance),
            slant: self.axis_value(Axis::Slant, self.toggles.italic, distance, max_distance),
            opacity: self.axis_value(Axis::Opacity, self.toggles.alpha, distance, max_distance),
        }
    }
}
