use bitflags::bitflags;

use crate::binding::{BindingKind, ResourceId};
use crate::coords::Rect;
use crate::error::{RenderError, Result};
use crate::paint::Pixels;
use crate::scene::DrawCmd;

bitflags! {
    /// Optional features a backend may provide.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Capabilities: u8 {
        const SHADERS        = 1 << 0;
        const MATERIALS      = 1 << 1;
        const TEXTURES       = 1 << 2;
        const RENDER_TARGETS = 1 << 3;
        const VIDEO          = 1 << 4;
        const READ_PIXELS    = 1 << 5;
    }
}

impl Capabilities {
    /// Capability required to bind a resource of `kind`, if any.
    pub fn for_binding(kind: BindingKind) -> Option<Capabilities> {
        match kind {
            BindingKind::Camera => None,
            BindingKind::Material => Some(Capabilities::MATERIALS),
            BindingKind::Shader => Some(Capabilities::SHADERS),
            BindingKind::Texture { .. } => Some(Capabilities::TEXTURES),
            BindingKind::Fbo => Some(Capabilities::RENDER_TARGETS),
            BindingKind::Video => Some(Capabilities::VIDEO),
        }
    }
}

/// Minimal surface every rendering backend provides.
///
/// Enough for immediate geometry, paths, meshes and cameras.
pub trait Backend {
    fn name(&self) -> &str;

    fn start_render(&mut self) {}

    fn finish_render(&mut self) {}

    /// The native viewport changed.
    fn set_viewport(&mut self, native: Rect) {
        let _ = native;
    }

    fn submit(&mut self, cmd: DrawCmd<'_>);

    /// Copies the native-space `region` into `pixels`, which is already
    /// allocated to the region's size. Rows are written top to bottom.
    fn read_pixels(&mut self, region: Rect, pixels: &mut Pixels<u8>) -> Result<()> {
        let _ = (region, pixels);
        Err(RenderError::UnsupportedOperation {
            operation: "read_pixels",
            backend: self.name().to_owned(),
        })
    }
}

/// Programmable-pipeline backend: adds resource binding.
///
/// `bind` must either fully succeed or leave the backend untouched; the
/// renderer opens a binding scope only after it returns `Ok`.
pub trait GpuBackend: Backend {
    fn bind(&mut self, kind: BindingKind, resource: ResourceId) -> Result<()>;

    fn unbind(&mut self, kind: BindingKind, resource: ResourceId);
}
