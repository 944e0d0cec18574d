//! Binding scopes for GPU resources.
//!
//! Every resource kind keeps its own LIFO of open bindings. Render targets
//! additionally keep a begin/end stack that snapshots viewport and matrix
//! state.

mod camera;
mod resources;
mod scope;

use std::sync::atomic::{AtomicU64, Ordering};

pub use camera::ScreenCamera;
pub use resources::{Camera, Material, MatrixUniforms, OffscreenTarget, RenderTarget, Shader, Texture};
pub use scope::{BindingManager, BindingScope, TargetScope};

/// Identity of a bindable resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Allocates a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Resource kind keyed per LIFO. Textures get one stack per slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BindingKind {
    Camera,
    Material,
    Shader,
    Texture { slot: u32 },
    Fbo,
    Video,
}
