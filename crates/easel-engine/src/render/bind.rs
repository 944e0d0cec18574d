use crate::binding::{BindingKind, BindingScope, Camera, Material, RenderTarget, ResourceId, Shader, TargetScope, Texture};
use crate::coords::Rect;
use crate::draw::VideoSource;
use crate::error::{RenderError, Result, StackKind};
use crate::transform::MatrixMode;
use crate::view::{Orientation, ViewportState};

use super::{Backend, GpuBackend, Renderer};

impl<B: Backend> Renderer<B> {
    fn snapshot_scope(&self, kind: BindingKind, resource: ResourceId) -> BindingScope {
        BindingScope {
            kind,
            resource,
            viewport: self.viewport.state(),
            model_view: self.matrices.current(MatrixMode::ModelView),
            projection: self.matrices.current(MatrixMode::Projection),
        }
    }

    /// Sets the viewport and loads the camera's projection and view.
    ///
    /// Works on every backend. The previous matrices are recorded in the
    /// binding scope but `unbind_camera` does not restore them; bracket with
    /// `push_view`/`pop_view` when restoration is needed.
    pub fn bind_camera(&mut self, camera: &dyn Camera, viewport: Rect) {
        let scope = self.snapshot_scope(BindingKind::Camera, camera.id());
        self.bindings.open(scope);

        self.viewport.set_viewport(viewport, true);
        self.sync_viewport();
        let orientation = self.viewport.orientation();
        self.viewport.set_orientation(orientation, camera.is_v_flipped());

        let projection = camera.projection_matrix(self.viewport.current_viewport());
        let oriented = self.viewport.orientation_matrix() * projection;
        self.matrices.load(MatrixMode::Projection, oriented);
        self.matrices.load_view_matrix(camera.view_matrix());
    }

    /// Closes the camera scope. Matrices and viewport stay as the camera left
    /// them.
    pub fn unbind_camera(&mut self, camera: &dyn Camera) -> Result<()> {
        self.bindings.close(BindingKind::Camera, camera.id()).map(|_| ())
    }
}

impl<B: GpuBackend> Renderer<B> {
    /// Backend first: a refused bind leaves no scope behind.
    fn open_gpu_binding(&mut self, kind: BindingKind, resource: ResourceId) -> Result<()> {
        self.backend.bind(kind, resource)?;
        let scope = self.snapshot_scope(kind, resource);
        self.bindings.open(scope);
        Ok(())
    }

    fn close_gpu_binding(&mut self, kind: BindingKind, resource: ResourceId) -> Result<()> {
        self.bindings.check_top(kind, resource)?;
        self.backend.unbind(kind, resource);
        self.bindings.close(kind, resource).map(|_| ())
    }

    // ── shaders and materials ─────────────────────────────────────────────

    /// Binds the shader and uploads the current matrices to it.
    pub fn bind_shader(&mut self, shader: &dyn Shader) -> Result<()> {
        self.open_gpu_binding(BindingKind::Shader, shader.id())?;
        shader.upload_matrices(&self.matrix_uniforms());
        Ok(())
    }

    pub fn unbind_shader(&mut self, shader: &dyn Shader) -> Result<()> {
        self.close_gpu_binding(BindingKind::Shader, shader.id())
    }

    pub fn bind_material(&mut self, material: &dyn Material) -> Result<()> {
        self.open_gpu_binding(BindingKind::Material, material.id())?;
        material.begin();
        material.upload_matrices(&self.matrix_uniforms());
        Ok(())
    }

    pub fn unbind_material(&mut self, material: &dyn Material) -> Result<()> {
        self.bindings.check_top(BindingKind::Material, material.id())?;
        material.end();
        self.close_gpu_binding(BindingKind::Material, material.id())
    }

    // ── textures and video ────────────────────────────────────────────────

    pub fn bind_texture(&mut self, texture: &dyn Texture, slot: u32) -> Result<()> {
        self.open_gpu_binding(BindingKind::Texture { slot }, texture.id())
    }

    pub fn unbind_texture(&mut self, texture: &dyn Texture, slot: u32) -> Result<()> {
        self.close_gpu_binding(BindingKind::Texture { slot }, texture.id())
    }

    pub fn bind_video(&mut self, video: &dyn VideoSource) -> Result<()> {
        self.open_gpu_binding(BindingKind::Video, video.id())
    }

    pub fn unbind_video(&mut self, video: &dyn VideoSource) -> Result<()> {
        self.close_gpu_binding(BindingKind::Video, video.id())
    }

    // ── render targets ────────────────────────────────────────────────────

    /// Binds a render target without touching viewport or matrices.
    pub fn bind_render_target(&mut self, target: &dyn RenderTarget) -> Result<()> {
        self.open_gpu_binding(BindingKind::Fbo, target.id())
    }

    pub fn unbind_render_target(&mut self, target: &dyn RenderTarget) -> Result<()> {
        self.close_gpu_binding(BindingKind::Fbo, target.id())
    }

    /// Redirects drawing into `target`.
    ///
    /// Saves the viewport, pushes the style, makes the target the whole
    /// surface with the default orientation and binds it. With
    /// `setup_perspective` the projection and model-view channels are also
    /// pushed and loaded with a screen perspective for the target's size.
    pub fn begin(&mut self, target: &dyn RenderTarget, setup_perspective: bool) -> Result<()> {
        let id = target.id();
        let size = target.size();
        self.open_gpu_binding(BindingKind::Fbo, id)?;

        let saved = self.viewport.state();
        let view = self.matrices.current_view();
        self.styles.push();
        self.viewport.restore(ViewportState::new(
            size,
            saved.v_flipped,
            Orientation::Default,
            saved.handedness,
        ));
        self.sync_viewport();

        if setup_perspective {
            self.matrices.push(MatrixMode::Projection);
            self.matrices.push(MatrixMode::ModelView);
            self.setup_screen();
        }

        self.bindings.begin_target(TargetScope {
            target: id,
            size,
            viewport: saved,
            view,
            pushed_matrices: setup_perspective,
        });
        Ok(())
    }

    /// Undoes the matching `begin`. Fails without side effects unless
    /// `target` is the innermost open target and every stack `begin` pushed
    /// can still be popped.
    pub fn end(&mut self, target: &dyn RenderTarget) -> Result<()> {
        let id = target.id();
        self.bindings.check_target(id)?;
        self.bindings.check_top(BindingKind::Fbo, id)?;
        let pushed_matrices = self.bindings.current_target().is_some_and(|s| s.pushed_matrices);
        if pushed_matrices {
            self.check_view_matrices()?;
        }
        if self.styles.depth() < 2 {
            return Err(RenderError::StackUnderflow { stack: StackKind::Style });
        }

        let scope = self.bindings.end_target(id)?;
        self.close_gpu_binding(BindingKind::Fbo, id)?;

        if scope.pushed_matrices {
            self.matrices.pop(MatrixMode::ModelView)?;
            self.matrices.pop(MatrixMode::Projection)?;
            self.matrices.restore_view(scope.view);
        }
        self.styles.pop()?;
        self.viewport.restore(scope.viewport);
        self.sync_viewport();
        Ok(())
    }
}
