//! Coordinate and geometry types shared across the engine.
//!
//! Logical space:
//! - origin top-left when the viewport is vertically flipped (the default)
//! - +X right, +Y down
//!
//! Vector and matrix types come from `glam`; only the rectangle is ours.

mod rect;

pub use rect::Rect;
