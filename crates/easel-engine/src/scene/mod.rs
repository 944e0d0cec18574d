//! Backend-facing command stream.
//!
//! The renderer resolves every draw into a [`DrawCmd`] carrying its data,
//! a snapshot of the paint state and the matrices in effect. Backends either
//! execute commands directly or record them, as [`DrawList`] does.

mod cmd;
mod list;

pub use cmd::{DrawCmd, GeometryCmd, PaintState, PolygonCmd, TextureSource, VertexAttributes};
pub use list::{BindingEvent, DrawItem, DrawList};
