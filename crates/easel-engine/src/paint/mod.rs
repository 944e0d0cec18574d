//! Paint model: colors and CPU pixel containers.
//!
//! Every color entry point normalizes into [`Color`], a straight-alpha `f32`
//! RGBA value in `[0, 1]`. Byte (0–255), 16-bit and float sources are scaled
//! on the way in, never stored in their original domain.

pub mod color;
pub mod pixels;

pub use color::Color;
pub use pixels::{ChannelWidth, PixelComponent, Pixels};
