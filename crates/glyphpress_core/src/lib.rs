//! # GLYPHPRESS Core
//!
//! Foundational types shared by the engine and by host integrations:
//!
//! - 2D math ([`Vec2`], [`Rect`]) in screen coordinates
//! - The variable-font axis model ([`Axis`], [`AxisRange`], [`Rounding`])
//!
//! This crate contains no engine logic and no host dependencies. Both the
//! engine and any backend must be able to use these types.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod axis;
pub mod math;

pub use axis::{Axis, AxisRange, Rounding};
pub use math::{Rect, Vec2};
