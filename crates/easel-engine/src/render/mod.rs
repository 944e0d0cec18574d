//! Rendering context and backend capability surfaces.
//!
//! [`Renderer`] owns every piece of mutable state (matrix stacks, style
//! stack, viewport, binding scopes) and resolves drawables into
//! [`DrawCmd`](crate::scene::DrawCmd)s for its backend.

mod backend;
mod bind;
mod capture;
mod config;
mod dispatch;
pub mod pipeline;
mod renderer;
mod shapes;

pub use backend::{Backend, Capabilities, GpuBackend};
pub use config::RendererConfig;
pub use renderer::Renderer;
