//! Render command generation.
//!
//! The engine owns no GPU surface and no DOM. Each frame it batches
//! backend-agnostic commands; the host applies them to whatever it renders
//! with. Glyph commands carry the resolved variation numerically; backends
//! that want the combined descriptor string call
//! [`FontVariation::descriptor`]. A packed [`GlyphInstance`] buffer rides
//! along for GPU-oriented backends.

use bytemuck::{Pod, Zeroable};

use crate::config::PressureConfig;
use crate::glyph::Glyph;
use crate::style::{BlockStyle, Color};

/// Static base weight the block renders at before variation is applied.
pub const BASE_FONT_WEIGHT: f32 = 100.0;

/// Resolved variable-font axis values for one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontVariation {
    /// Weight (`wght`) value.
    pub weight: f32,
    /// Stretch (`wdth`) value.
    pub stretch: f32,
    /// Slant (`ital`) value.
    pub slant: f32,
}

impl FontVariation {
    /// The combined variation descriptor string.
    ///
    /// Axis order and formatting are fixed: integer `wght` and `wdth`,
    /// two-decimal `ital`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        format!(
            "wght {}, wdth {}, ital {:.2}",
            self.weight as i32, self.stretch as i32, self.slant
        )
    }
}

/// Packed per-glyph record for GPU-oriented backends.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphInstance {
    /// Glyph index.
    pub index: u32,
    /// Stretch axis value.
    pub stretch: f32,
    /// Weight axis value.
    pub weight: f32,
    /// Slant axis value.
    pub slant: f32,
    /// Opacity value.
    pub opacity: f32,
}

/// A render command for the animated text block.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Primary glyph layer.
    Glyph {
        /// Glyph index.
        index: usize,
        /// Character value.
        ch: char,
        /// Resolved variation.
        variation: FontVariation,
        /// Opacity (0-1).
        opacity: f32,
    },
    /// Outline layer rendered behind the primary glyph (stroke mode).
    GlyphOutline {
        /// Glyph index.
        index: usize,
        /// Character value.
        ch: char,
        /// Resolved variation (matches the primary layer).
        variation: FontVariation,
        /// Stroke width in pixels.
        width: f32,
        /// Stroke color.
        color: Color,
    },
    /// Block-level posture; emitted when a fit lands, not per frame.
    Block(BlockStyle),
}

/// Collects and batches render commands for one frame.
pub struct Renderer {
    /// Font family forwarded in block commands.
    font_family: String,
    /// Primary layer fill color.
    text_color: Color,
    /// Outline mode enabled.
    stroke: bool,
    /// Outline stroke color.
    stroke_color: Color,
    /// Outline stroke width.
    stroke_width: f32,
    /// Even-spacing layout mode flag forwarded in block commands.
    flex: bool,
    /// Commands for the current frame.
    commands: Vec<RenderCommand>,
    /// Packed instances for the current frame.
    instances: Vec<GlyphInstance>,
}

impl Renderer {
    /// Creates a renderer from engine configuration.
    #[must_use]
    pub fn new(config: &PressureConfig) -> Self {
        Self {
            font_family: config.font_family.clone(),
            text_color: config.text_color,
            stroke: config.stroke,
            stroke_color: config.stroke_color,
            stroke_width: config.stroke_width,
            flex: config.flex,
            commands: Vec::with_capacity(256),
            instances: Vec::with_capacity(128),
        }
    }

    /// Begins a new frame, clearing batched state.
    ///
    /// Capacity is retained: steady-state frames allocate nothing.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.instances.clear();
    }

    /// Batches one glyph's layers.
    ///
    /// In stroke mode the outline layer is pushed first so it lands behind
    /// the primary glyph.
    pub fn push_glyph(&mut self, glyph: &Glyph) {
        let variation = FontVariation {
            weight: glyph.attrs.weight,
            stretch: glyph.attrs.stretch,
            slant: glyph.attrs.slant,
        };

        if self.stroke {
            self.commands.push(RenderCommand::GlyphOutline {
                index: glyph.index,
                ch: glyph.ch,
                variation,
                width: self.stroke_width,
                color: self.stroke_color,
            });
        }

        self.commands.push(RenderCommand::Glyph {
            index: glyph.index,
            ch: glyph.ch,
            variation,
            opacity: glyph.attrs.opacity,
        });

        self.instances.push(GlyphInstance {
            index: glyph.index as u32,
            stretch: glyph.attrs.stretch,
            weight: glyph.attrs.weight,
            slant: glyph.attrs.slant,
            opacity: glyph.attrs.opacity,
        });
    }

    /// Batches a block-posture update.
    pub fn push_block(&mut self, font_size: f32, line_height: f32, scale_y: f32) {
        self.commands.push(RenderCommand::Block(BlockStyle {
            font_family: self.font_family.clone(),
            font_size,
            line_height,
            scale_y,
            flex: self.flex,
            uppercase: true,
            base_weight: BASE_FONT_WEIGHT,
            color: self.text_color,
        }));
    }

    /// Returns the batched commands for this frame.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the packed glyph instances for this frame.
    #[must_use]
    pub fn instances(&self) -> &[GlyphInstance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphAttributes;
    use glyphpress_core::Vec2;

    fn glyph(index: usize, ch: char) -> Glyph {
        Glyph {
            index,
            ch,
            center: Vec2::ZERO,
            attrs: GlyphAttributes {
                stretch: 200.0,
                weight: 900.0,
                slant: 1.0,
                opacity: 0.25,
            },
        }
    }

    #[test]
    fn test_descriptor_format() {
        let variation = FontVariation {
            weight: 550.0,
            stretch: 105.0,
            slant: 0.5,
        };
        assert_eq!(variation.descriptor(), "wght 550, wdth 105, ital 0.50");
    }

    #[test]
    fn test_glyph_command_batching() {
        let config = PressureConfig::default();
        let mut renderer = Renderer::new(&config);

        renderer.begin_frame();
        renderer.push_glyph(&glyph(0, 'A'));

        assert_eq!(renderer.commands().len(), 1);
        assert_eq!(renderer.instances().len(), 1);
        match &renderer.commands()[0] {
            RenderCommand::Glyph { ch, opacity, .. } => {
                assert_eq!(*ch, 'A');
                assert_eq!(*opacity, 0.25);
            }
            other => panic!("expected glyph command, got {other:?}"),
        }
    }

    #[test]
    fn test_stroke_mode_pushes_outline_behind() {
        let config = PressureConfig {
            stroke: true,
            ..Default::default()
        };
        let mut renderer = Renderer::new(&config);

        renderer.begin_frame();
        renderer.push_glyph(&glyph(3, 'R'));

        assert_eq!(renderer.commands().len(), 2);
        assert!(matches!(
            renderer.commands()[0],
            RenderCommand::GlyphOutline { width, .. } if width == 2.0
        ));
        assert!(matches!(renderer.commands()[1], RenderCommand::Glyph { .. }));
    }

    #[test]
    fn test_block_command_carries_posture() {
        let config = PressureConfig::default();
        let mut renderer = Renderer::new(&config);

        renderer.begin_frame();
        renderer.push_block(400.0, 1.0, 1.0);

        match &renderer.commands()[0] {
            RenderCommand::Block(style) => {
                assert_eq!(style.font_size, 400.0);
                assert_eq!(style.base_weight, BASE_FONT_WEIGHT);
                assert!(style.uppercase);
                assert!(style.flex);
            }
            other => panic!("expected block command, got {other:?}"),
        }
    }

    #[test]
    fn test_glyph_instance_is_pod() {
        let instance = GlyphInstance {
            index: 1,
            stretch: 200.0,
            weight: 900.0,
            slant: 1.0,
            opacity: 1.0,
        };
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 20);
    }
}
