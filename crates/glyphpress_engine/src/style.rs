//! Color and block-level styling types.
//!
//! The engine's styling surface is deliberately small: a text color, an
//! optional stroke color/width for the outlined variant, and the block
//! posture the renderer applies (size, line height, vertical scale).

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Solid red.
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Parses a `#RRGGBB` or `#RRGGBBAA` string.
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        match digits.len() {
            6 => {
                let rgb = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::hex((rgb << 8) | 0xFF))
            }
            8 => {
                let rgba = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::hex(rgba))
            }
            _ => None,
        }
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        let channel = |v: f32| (v * 255.0).round() as u32;
        if (color.a - 1.0).abs() < f32::EPSILON {
            format!(
                "#{:02X}{:02X}{:02X}",
                channel(color.r),
                channel(color.g),
                channel(color.b)
            )
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                channel(color.r),
                channel(color.g),
                channel(color.b),
                channel(color.a)
            )
        }
    }
}

/// Block-level posture applied by the renderer.
///
/// Emitted when a fit lands, not per frame. The vertical scale transform is
/// pinned to the top edge of the block: scaling grows downward and the top
/// stays aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStyle {
    /// Font family name the backend should resolve.
    pub font_family: String,
    /// Base font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Vertical scale factor, origin at the top edge.
    pub scale_y: f32,
    /// Even-spacing layout mode: glyphs justified across the full width.
    pub flex: bool,
    /// Render characters uppercased.
    pub uppercase: bool,
    /// Static base weight before variation is applied.
    pub base_weight: f32,
    /// Fill color for the primary glyph layer.
    pub color: Color,
}
