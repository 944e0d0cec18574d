//! Viewport & orientation management.
//!
//! The native viewport lives in backend pixel space (origin bottom-left, the
//! way GPU viewports are specified). The logical viewport is what callers see:
//! the native rectangle after the vertical flip and the surface orientation
//! are applied.

mod orientation;
mod screen;
mod viewport;

pub use orientation::Orientation;
pub use screen::{screen_ortho, screen_perspective, ScreenSetup, DEFAULT_FOV};
pub use viewport::{ViewportManager, ViewportState};

pub use crate::transform::Handedness;
