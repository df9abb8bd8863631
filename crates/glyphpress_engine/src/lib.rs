//! # GLYPHPRESS Engine
//!
//! A pointer-reactive variable-font typography engine: one text block whose
//! glyphs continuously deform based on proximity to a smoothed cursor/touch
//! position.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      FRAME PIPELINE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Pointer Cell → Smoother → Glyph Geometry → Mapper → Render  │
//! │       ↑                         ↑                      ↓     │
//! │  Host Listeners          Surface Probes         Surface Apply│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The fitter runs out-of-band (mount / resize / text change) and feeds base
//! sizing into the renderer. Everything is single-threaded and cooperative:
//! host listeners only write the pointer cell, the loop does all the work.
//!
//! ## Design Philosophy
//!
//! This is NOT a general animation framework. It animates ONE text block
//! against ONE shared pointer signal, and it does that every frame without
//! allocating.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod attr;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod fit;
pub mod glyph;
pub mod headless;
pub mod pointer;
pub mod render;
pub mod smoothing;
pub mod style;
pub mod surface;

pub use attr::{AttributeMapper, AxisToggles};
pub use config::PressureConfig;
pub use engine::{CancelToken, EngineState, FrameStats, PressureEngine};
pub use error::{EngineError, EngineResult};
pub use events::{EventSender, StructuralEvent};
pub use fit::LayoutFitter;
pub use glyph::{Glyph, GlyphAttributes, TextBlock};
pub use headless::HeadlessSurface;
pub use pointer::{PointerHandle, PointerTracker};
pub use render::{FontVariation, GlyphInstance, RenderCommand, Renderer};
pub use smoothing::Smoother;
pub use style::{BlockStyle, Color};
pub use surface::{FrameClock, PressureSurface, StdFrameClock};
