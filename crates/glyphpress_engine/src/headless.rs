//! Headless host surface.
//!
//! A deterministic, in-process [`PressureSurface`] used by integration tests
//! and the demo binary. The layout model is a single line of uniform-advance
//! glyphs (advance = half the font size, the same average the width-fitting
//! rule assumes):
//!
//! - flex mode: glyphs occupy equal slots across the full container width
//! - natural mode: glyph widths follow each glyph's current stretch value,
//!   centered in the container - so attribute changes genuinely shift layout
//!   between frames, as they do in a real backend
//!
//! Geometry queries report nothing until the first block posture has been
//! applied, exactly like an unmounted backend.

use glyphpress_core::Rect;

use crate::render::RenderCommand;
use crate::style::{BlockStyle, Color};
use crate::surface::PressureSurface;

/// Last-applied state of one glyph.
#[derive(Debug, Clone, Default)]
pub struct AppliedGlyph {
    /// Character value.
    pub ch: char,
    /// Combined variation descriptor string.
    pub descriptor: String,
    /// Applied opacity.
    pub opacity: f32,
    /// Stroke layer, when outline mode is active.
    pub outline: Option<AppliedOutline>,
}

/// Last-applied outline layer of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedOutline {
    /// Stroke width in pixels.
    pub width: f32,
    /// Stroke color.
    pub color: Color,
}

/// Deterministic in-process surface.
#[derive(Debug)]
pub struct HeadlessSurface {
    /// Container rectangle.
    container: Rect,
    /// Characters backing the glyph run.
    chars: Vec<char>,
    /// Current stretch per glyph (drives natural-mode widths).
    stretches: Vec<f32>,
    /// Last applied per-glyph state.
    applied: Vec<AppliedGlyph>,
    /// Last applied block posture.
    block: Option<BlockStyle>,
    /// Number of `apply` calls seen.
    frames_applied: u64,
}

impl HeadlessSurface {
    /// Creates a surface for the given container and text.
    #[must_use]
    pub fn new(container: Rect, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let count = chars.len();
        Self {
            container,
            chars,
            stretches: vec![100.0; count],
            applied: Vec::new(),
            block: None,
            frames_applied: 0,
        }
    }

    /// Replaces the backing text (the host recreates glyph nodes).
    pub fn set_text(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.stretches = vec![100.0; self.chars.len()];
        self.applied.clear();
    }

    /// Moves or resizes the container.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    /// Returns the last applied per-glyph state.
    #[must_use]
    pub fn applied_glyphs(&self) -> &[AppliedGlyph] {
        &self.applied
    }

    /// Returns the last applied block posture.
    #[must_use]
    pub fn block_style(&self) -> Option<&BlockStyle> {
        self.block.as_ref()
    }

    /// Returns the number of frames applied so far.
    #[must_use]
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied
    }

    /// Uniform glyph advance at the current font size.
    fn advance(&self, style: &BlockStyle) -> f32 {
        style.font_size * 0.5
    }

    /// Natural (non-flex) width of the glyph run, stretch-aware.
    fn natural_width(&self, style: &BlockStyle) -> f32 {
        let advance = self.advance(style);
        self.stretches.iter().map(|s| advance * s / 100.0).sum()
    }
}

impl PressureSurface for HeadlessSurface {
    fn container_rect(&self) -> Option<Rect> {
        Some(self.container)
    }

    fn block_rect(&self) -> Option<Rect> {
        let style = self.block.as_ref()?;
        let height = style.font_size * style.line_height * style.scale_y;
        if style.flex {
            Some(Rect::new(
                self.container.x,
                self.container.y,
                self.container.width,
                height,
            ))
        } else {
            let width = self.natural_width(style);
            let x = self.container.x + (self.container.width - width) * 0.5;
            Some(Rect::new(x, self.container.y, width, height))
        }
    }

    fn glyph_rect(&self, index: usize) -> Option<Rect> {
        let style = self.block.as_ref()?;
        if index >= self.chars.len() {
            return None;
        }
        let height = style.font_size * style.scale_y;
        let y = self.container.y;

        if style.flex {
            let count = self.chars.len() as f32;
            let slot = self.container.width / count;
            let x = self.container.x + slot * index as f32;
            return Some(Rect::new(x, y, slot, height));
        }

        let advance = self.advance(style);
        let block = self.block_rect()?;
        let mut x = block.x;
        for stretch in &self.stretches[..index] {
            x += advance * stretch / 100.0;
        }
        let width = advance * self.stretches[index] / 100.0;
        Some(Rect::new(x, y, width, height))
    }

    fn apply(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            match command {
                RenderCommand::Block(style) => {
                    self.block = Some(style.clone());
                }
                RenderCommand::Glyph {
                    index,
                    ch,
                    variation,
                    opacity,
                } => {
                    if self.applied.len() < self.chars.len() {
                        self.applied.resize(self.chars.len(), AppliedGlyph::default());
                    }
                    if let Some(slot) = self.applied.get_mut(*index) {
                        slot.ch = *ch;
                        slot.descriptor = variation.descriptor();
                        slot.opacity = *opacity;
                    }
                    if let Some(stretch) = self.stretches.get_mut(*index) {
                        *stretch = variation.stretch;
                    }
                }
                RenderCommand::GlyphOutline { index, width, color, .. } => {
                    if self.applied.len() < self.chars.len() {
                        self.applied.resize(self.chars.len(), AppliedGlyph::default());
                    }
                    if let Some(slot) = self.applied.get_mut(*index) {
                        slot.outline = Some(AppliedOutline {
                            width: *width,
                            color: *color,
                        });
                    }
                }
            }
        }
        self.frames_applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PressureConfig;
    use crate::render::Renderer;
    use crate::glyph::TextBlock;
    use glyphpress_core::Vec2;

    #[test]
    fn test_geometry_is_absent_before_first_block() {
        let surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 800.0, 400.0), "AB");
        assert!(surface.block_rect().is_none());
        assert!(surface.glyph_rect(0).is_none());
        assert!(surface.container_rect().is_some());
    }

    #[test]
    fn test_flex_slots_span_container() {
        let mut surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 900.0, 300.0), "StarScope");
        let config = PressureConfig::default();
        let mut renderer = Renderer::new(&config);
        renderer.begin_frame();
        renderer.push_block(200.0, 1.0, 1.0);
        surface.apply(renderer.commands());

        let block = surface.block_rect().unwrap();
        assert_eq!(block.width, 900.0);
        assert_eq!(block.height, 200.0);

        // 9 glyphs, 100px slots; middle glyph centered at x=450.
        let middle = surface.glyph_rect(4).unwrap();
        assert_eq!(middle.center(), Vec2::new(450.0, 100.0));
        assert!(surface.glyph_rect(9).is_none());
    }

    #[test]
    fn test_natural_width_follows_stretch() {
        let mut surface = HeadlessSurface::new(Rect::new(0.0, 0.0, 800.0, 400.0), "AB");
        let config = PressureConfig {
            flex: false,
            ..Default::default()
        };
        let mut renderer = Renderer::new(&config);
        renderer.begin_frame();
        renderer.push_block(100.0, 1.0, 1.0);
        surface.apply(renderer.commands());

        // Two glyphs at stretch 100: natural width = 2 * 50.
        assert_eq!(surface.block_rect().unwrap().width, 100.0);

        // Stretch one glyph to 200: its width doubles, layout shifts.
        let mut block = TextBlock::new("AB", 24.0);
        block.glyphs_mut()[0].attrs.stretch = 200.0;
        renderer.begin_frame();
        for glyph in block.glyphs() {
            renderer.push_glyph(glyph);
        }
        surface.apply(renderer.commands());

        assert_eq!(surface.block_rect().unwrap().width, 150.0);
    }
}
