//! Variable-font axis model.
//!
//! An axis is a continuous typographic parameter interpolated in real time.
//! Three of the four axes map onto registered OpenType variation tags; the
//! fourth (opacity) rides along with glyph styling but is not a font axis.
//!
//! Each axis carries a fixed policy: the range it sweeps when enabled, the
//! constant it falls back to when disabled, and how raw interpolated values
//! are rounded before they reach a backend.

/// Inclusive value range for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    /// Minimum value (fully relaxed, at or beyond max distance).
    pub min: f32,
    /// Maximum value (full effect, at zero distance).
    pub max: f32,
}

impl AxisRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps a value into this range.
    #[must_use]
    pub fn clamp(self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Rounding policy applied to interpolated axis values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Round down to a whole number (integer axes).
    Floor,
    /// Round to two decimal places (fractional axes).
    TwoDecimals,
}

impl Rounding {
    /// Applies the rounding policy to a raw value.
    #[must_use]
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Self::Floor => value.floor(),
            Self::TwoDecimals => (value * 100.0).round() / 100.0,
        }
    }
}

/// A reactive glyph attribute axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Glyph width (OpenType `wdth`).
    Stretch,
    /// Glyph boldness (OpenType `wght`).
    Weight,
    /// Glyph slant (OpenType `ital`).
    Slant,
    /// Glyph opacity (not a font axis; applied as alpha).
    Opacity,
}

impl Axis {
    /// All axes, in descriptor order.
    pub const ALL: [Self; 4] = [Self::Weight, Self::Stretch, Self::Slant, Self::Opacity];

    /// The range this axis sweeps when enabled.
    #[must_use]
    pub const fn range(self) -> AxisRange {
        match self {
            Self::Stretch => AxisRange::new(5.0, 200.0),
            Self::Weight => AxisRange::new(100.0, 900.0),
            Self::Slant | Self::Opacity => AxisRange::new(0.0, 1.0),
        }
    }

    /// The constant value this axis holds when disabled.
    #[must_use]
    pub const fn fallback(self) -> f32 {
        match self {
            Self::Stretch => 100.0,
            Self::Weight => 400.0,
            Self::Slant => 0.0,
            Self::Opacity => 1.0,
        }
    }

    /// The rounding policy for this axis.
    #[must_use]
    pub const fn rounding(self) -> Rounding {
        match self {
            Self::Stretch | Self::Weight => Rounding::Floor,
            Self::Slant | Self::Opacity => Rounding::TwoDecimals,
        }
    }

    /// The OpenType variation tag, if this axis is a font axis.
    #[must_use]
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            Self::Stretch => Some("wdth"),
            Self::Weight => Some("wght"),
            Self::Slant => Some("ital"),
            Self::Opacity => None,
        }
    }
}
