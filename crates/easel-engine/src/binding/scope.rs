use std::collections::HashMap;

use glam::{Mat4, Vec2};

use crate::error::{RenderError, Result};
use crate::view::ViewportState;

use super::{BindingKind, ResourceId};

/// One open binding plus the state that was current when it opened.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BindingScope {
    pub kind: BindingKind,
    pub resource: ResourceId,
    pub viewport: ViewportState,
    pub model_view: Mat4,
    pub projection: Mat4,
}

/// An open `begin`/`end` region on a render target.
///
/// Records exactly what `begin` pushed so `end` can undo it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TargetScope {
    pub target: ResourceId,
    pub size: Vec2,
    pub viewport: ViewportState,
    /// View matrix to restore when `pushed_matrices` is set.
    pub view: Mat4,
    pub pushed_matrices: bool,
}

/// Per-kind LIFOs of open bindings and the render-target begin/end stack.
#[derive(Debug, Default)]
pub struct BindingManager {
    scopes: HashMap<BindingKind, Vec<BindingScope>>,
    targets: Vec<TargetScope>,
}

impl BindingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost open binding of `kind`.
    pub fn current(&self, kind: BindingKind) -> Option<&BindingScope> {
        self.scopes.get(&kind).and_then(|s| s.last())
    }

    pub fn depth(&self, kind: BindingKind) -> usize {
        self.scopes.get(&kind).map_or(0, Vec::len)
    }

    /// Total open bindings across all kinds (render target scopes excluded).
    pub fn open_bindings(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }

    /// Fails unless `resource` is the topmost binding of `kind`.
    pub fn check_top(&self, kind: BindingKind, resource: ResourceId) -> Result<()> {
        let expected = self.current(kind).map(|s| s.resource);
        if expected == Some(resource) {
            Ok(())
        } else {
            Err(RenderError::UnbalancedBinding {
                kind,
                expected,
                found: resource,
            })
        }
    }

    pub fn open(&mut self, scope: BindingScope) {
        log::debug!("bind {:?} {:?}", scope.kind, scope.resource);
        self.scopes.entry(scope.kind).or_default().push(scope);
    }

    /// Closes the topmost binding of `kind`, which must be `resource`.
    pub fn close(&mut self, kind: BindingKind, resource: ResourceId) -> Result<BindingScope> {
        self.check_top(kind, resource)?;
        log::debug!("unbind {kind:?} {resource:?}");
        let stack = self.scopes.get_mut(&kind);
        // check_top guarantees a non-empty stack for `kind`.
        let scope = stack.and_then(Vec::pop).ok_or(RenderError::UnbalancedBinding {
            kind,
            expected: None,
            found: resource,
        })?;
        Ok(scope)
    }

    // ── render targets ────────────────────────────────────────────────────

    pub fn current_target(&self) -> Option<&TargetScope> {
        self.targets.last()
    }

    pub fn target_depth(&self) -> usize {
        self.targets.len()
    }

    pub fn begin_target(&mut self, scope: TargetScope) {
        log::debug!("begin target {:?} ({}x{})", scope.target, scope.size.x, scope.size.y);
        self.targets.push(scope);
    }

    /// Fails unless `target` is the innermost open render target.
    pub fn check_target(&self, target: ResourceId) -> Result<()> {
        let expected = self.targets.last().map(|s| s.target);
        if expected == Some(target) {
            Ok(())
        } else {
            Err(RenderError::UnbalancedBinding {
                kind: BindingKind::Fbo,
                expected,
                found: target,
            })
        }
    }

    pub fn end_target(&mut self, target: ResourceId) -> Result<TargetScope> {
        self.check_target(target)?;
        log::debug!("end target {target:?}");
        self.targets.pop().ok_or(RenderError::UnbalancedBinding {
            kind: BindingKind::Fbo,
            expected: None,
            found: target,
        })
    }
}
