use glam::{Mat4, Vec2};

use crate::coords::Rect;

use super::ResourceId;

/// Matrix state handed to shaders and materials when they are bound.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MatrixUniforms {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub model_view_projection: Mat4,
    pub normal: Mat4,
    pub texture: Mat4,
    pub view: Mat4,
}

/// A camera consumed by `bind_camera`.
pub trait Camera {
    fn id(&self) -> ResourceId;

    /// Camera-to-world transform.
    fn global_transform(&self) -> Mat4;

    fn projection_matrix(&self, viewport: Rect) -> Mat4;

    /// World-to-camera transform.
    fn view_matrix(&self) -> Mat4 {
        self.global_transform().inverse()
    }

    fn is_v_flipped(&self) -> bool {
        false
    }
}

/// A compiled shader program exposing a matrix upload hook.
pub trait Shader {
    fn id(&self) -> ResourceId;

    fn upload_matrices(&self, uniforms: &MatrixUniforms);
}

/// A surface material. `begin`/`end` bracket its binding scope.
pub trait Material {
    fn id(&self) -> ResourceId;

    fn begin(&self);

    fn end(&self);

    fn upload_matrices(&self, uniforms: &MatrixUniforms) {
        let _ = uniforms;
    }
}

/// A GPU texture handle.
pub trait Texture {
    fn id(&self) -> ResourceId;

    fn size(&self) -> Vec2;
}

/// An off-screen render target (framebuffer object).
pub trait RenderTarget {
    fn id(&self) -> ResourceId;

    fn size(&self) -> Vec2;
}

/// Plain render target description for backends that allocate storage
/// themselves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OffscreenTarget {
    id: ResourceId,
    size: Vec2,
}

impl OffscreenTarget {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            id: ResourceId::next(),
            size: Vec2::new(width, height),
        }
    }
}

impl RenderTarget for OffscreenTarget {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}
