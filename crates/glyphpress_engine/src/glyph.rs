//! Glyph and text-block records.
//!
//! One record per character of the configured text, addressed by stable
//! index. Order is text order and never changes. Geometry is re-queried from
//! live layout every frame, so the records hold no cached offsets; only the
//! last-known center and the last computed attribute set.

use glyphpress_core::{Axis, Rect, Vec2};

/// The current computed attribute set of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphAttributes {
    /// Stretch (width) axis value.
    pub stretch: f32,
    /// Weight (boldness) axis value.
    pub weight: f32,
    /// Slant (italic) axis value.
    pub slant: f32,
    /// Opacity (alpha) value.
    pub opacity: f32,
}

impl Default for GlyphAttributes {
    /// The neutral set: every axis at its disabled fallback.
    fn default() -> Self {
        Self {
            stretch: Axis::Stretch.fallback(),
            weight: Axis::Weight.fallback(),
            slant: Axis::Slant.fallback(),
            opacity: Axis::Opacity.fallback(),
        }
    }
}

/// One character of the animated text block.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Stable index, assigned at text-split time.
    pub index: usize,
    /// Character value.
    pub ch: char,
    /// Screen-space bounding-box center, recomputed every frame.
    pub center: Vec2,
    /// Current computed attribute set.
    pub attrs: GlyphAttributes,
}

/// The animated text block: an ordered run of glyphs plus sizing state.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// Glyph records, in text order.
    glyphs: Vec<Glyph>,
    /// Container rectangle in viewport coordinates.
    pub container: Rect,
    /// Base font size in pixels.
    pub base_font_size: f32,
    /// Vertical scale factor (1 when vertical-fit is off or pending).
    pub scale_y: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl TextBlock {
    /// Creates a block for the given text.
    ///
    /// The base font size starts at the configured minimum until the first
    /// fit runs.
    #[must_use]
    pub fn new(text: &str, min_font_size: f32) -> Self {
        Self {
            glyphs: Self::split(text),
            container: Rect::ZERO,
            base_font_size: min_font_size,
            scale_y: 1.0,
            line_height: 1.0,
        }
    }

    /// Recreates the glyph run for new text content.
    ///
    /// Sizing state is left untouched; the caller re-runs the fitter.
    pub fn rebuild(&mut self, text: &str) {
        self.glyphs = Self::split(text);
    }

    /// Splits text into glyph records with stable indices.
    fn split(text: &str) -> Vec<Glyph> {
        text.chars()
            .enumerate()
            .map(|(index, ch)| Glyph {
                index,
                ch,
                center: Vec2::ZERO,
                attrs: GlyphAttributes::default(),
            })
            .collect()
    }

    /// Returns the glyph records.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Returns mutable access to the glyph records.
    pub fn glyphs_mut(&mut self) -> &mut [Glyph] {
        &mut self.glyphs
    }

    /// Returns the glyph count (== character count of the text).
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_count_matches_chars() {
        let block = TextBlock::new("StarScope", 24.0);
        assert_eq!(block.glyph_count(), 9);

        let chars: Vec<char> = "StarScope".chars().collect();
        for (i, glyph) in block.glyphs().iter().enumerate() {
            assert_eq!(glyph.index, i);
            assert_eq!(glyph.ch, chars[i]);
            assert_eq!(glyph.attrs, GlyphAttributes::default());
        }
    }

    #[test]
    fn test_rebuild_replaces_run() {
        let mut block = TextBlock::new("AB", 24.0);
        block.base_font_size = 400.0;

        block.rebuild("XYZ");
        assert_eq!(block.glyph_count(), 3);
        assert_eq!(block.glyphs()[2].ch, 'Z');
        // Sizing survives until the next fit
        assert_eq!(block.base_font_size, 400.0);
    }

    #[test]
    fn test_empty_text_has_no_glyphs() {
        let block = TextBlock::new("", 24.0);
        assert_eq!(block.glyph_count(), 0);
    }

    #[test]
    fn test_default_attrs_are_fallbacks() {
        let attrs = GlyphAttributes::default();
        assert_eq!(attrs.stretch, 100.0);
        assert_eq!(attrs.weight, 400.0);
        assert_eq!(attrs.slant, 0.0);
        assert_eq!(attrs.opacity, 1.0);
    }
}
