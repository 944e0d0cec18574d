//! Drawable entities.
//!
//! The engine never stores these: they are borrowed for the duration of one
//! draw call and resolved into backend commands by the renderer.

mod anchor;
mod image;
mod mesh;
mod node;
mod path;
pub mod primitives;
pub(crate) mod shapes;

pub use anchor::Anchor;
pub use image::{Image, ImageRef, PixelFormat, VideoSource};
pub use mesh::{Mesh, MeshFeatures, PrimitiveMode};
pub use node::Node;
pub use path::{Path, PathCommand, Polyline, Stroke};
pub use primitives::{Primitive, Resolutions};

use crate::coords::Rect;

/// Which topology a mesh or primitive is rasterized as.
///
/// `Wireframe` keeps the fill vertex and index data and only changes how
/// the backend rasterizes it (edges instead of faces).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum RenderMode {
    Points,
    Wireframe,
    #[default]
    Fill,
}

/// Closed set of drawable kinds accepted by `Renderer::draw`.
#[derive(Clone, Copy)]
pub enum Drawable<'a> {
    Polyline(&'a Polyline),
    /// A path, optionally offset through the model-view transform.
    Path {
        path: &'a Path,
        offset: Option<glam::Vec2>,
    },
    /// A mesh; `features: None` uses the mesh's own usage flags.
    Mesh {
        mesh: &'a Mesh,
        mode: RenderMode,
        features: Option<MeshFeatures>,
    },
    Primitive {
        primitive: &'a Primitive,
        mode: RenderMode,
    },
    Node(&'a Node),
    /// An image region `source` (texels) drawn into `dest` at depth `z`.
    Image {
        image: ImageRef<'a>,
        dest: Rect,
        z: f32,
        source: Rect,
    },
    Video {
        video: &'a dyn VideoSource,
        dest: Rect,
    },
}
