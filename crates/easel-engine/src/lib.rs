//! Easel engine crate.
//!
//! Backend-agnostic renderer state: matrix stacks, style stack, viewport and
//! orientation, binding scopes, and a draw dispatcher that turns drawables
//! into backend commands.

pub mod error;
pub mod logging;

pub mod coords;
pub mod paint;
pub mod style;
pub mod transform;
pub mod view;

pub mod binding;
pub mod draw;
pub mod render;
pub mod scene;

pub use error::{RenderError, Result};
pub use render::{Backend, GpuBackend, Renderer, RendererConfig};

pub use glam;
