use glam::{Mat3, Mat4, Vec3};

use crate::error::Result;

use super::{Handedness, MatrixMode, MatrixStack};

/// The three channel stacks plus the current view matrix.
///
/// Derived matrices (normal matrix) are computed on read so they always
/// reflect the latest mutation.
#[derive(Debug, Clone)]
pub struct MatrixStacks {
    model_view: MatrixStack,
    projection: MatrixStack,
    texture: MatrixStack,
    view: Mat4,
}

impl Default for MatrixStacks {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStacks {
    pub fn new() -> Self {
        Self {
            model_view: MatrixStack::new(MatrixMode::ModelView),
            projection: MatrixStack::new(MatrixMode::Projection),
            texture: MatrixStack::new(MatrixMode::Texture),
            view: Mat4::IDENTITY,
        }
    }

    #[inline]
    pub fn stack(&self, mode: MatrixMode) -> &MatrixStack {
        match mode {
            MatrixMode::ModelView => &self.model_view,
            MatrixMode::Projection => &self.projection,
            MatrixMode::Texture => &self.texture,
        }
    }

    #[inline]
    fn stack_mut(&mut self, mode: MatrixMode) -> &mut MatrixStack {
        match mode {
            MatrixMode::ModelView => &mut self.model_view,
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::Texture => &mut self.texture,
        }
    }

    // ── channel operations ────────────────────────────────────────────────

    #[inline]
    pub fn push(&mut self, mode: MatrixMode) {
        self.stack_mut(mode).push();
    }

    #[inline]
    pub fn pop(&mut self, mode: MatrixMode) -> Result<()> {
        self.stack_mut(mode).pop()
    }

    #[inline]
    pub fn load(&mut self, mode: MatrixMode, m: Mat4) {
        self.stack_mut(mode).load(m);
    }

    #[inline]
    pub fn mult(&mut self, mode: MatrixMode, m: Mat4) {
        self.stack_mut(mode).mult(m);
    }

    #[inline]
    pub fn current(&self, mode: MatrixMode) -> Mat4 {
        self.stack(mode).current()
    }

    #[inline]
    pub fn depth(&self, mode: MatrixMode) -> usize {
        self.stack(mode).depth()
    }

    // ── composition helpers ───────────────────────────────────────────────

    pub fn translate(&mut self, mode: MatrixMode, offset: Vec3) {
        self.mult(mode, Mat4::from_translation(offset));
    }

    pub fn scale(&mut self, mode: MatrixMode, amount: Vec3) {
        self.mult(mode, Mat4::from_scale(amount));
    }

    /// Rotates about `axis` by `degrees`, signed by `handedness`.
    ///
    /// A zero axis is ignored.
    pub fn rotate(&mut self, mode: MatrixMode, handedness: Handedness, degrees: f32, axis: Vec3) {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }
        let angle = handedness.signed_radians(degrees);
        self.mult(mode, Mat4::from_axis_angle(axis, angle));
    }

    // ── view matrix ───────────────────────────────────────────────────────

    /// Sets the view matrix and makes it the current model-view.
    pub fn load_view_matrix(&mut self, m: Mat4) {
        self.view = m;
        self.model_view.load(m);
    }

    pub fn mult_view_matrix(&mut self, m: Mat4) {
        self.view *= m;
        self.model_view.mult(m);
    }

    #[inline]
    pub fn current_view(&self) -> Mat4 {
        self.view
    }

    /// Restores a view matrix captured earlier (view stack support).
    #[inline]
    pub(crate) fn restore_view(&mut self, m: Mat4) {
        self.view = m;
    }

    /// Inverse-transpose of the upper 3×3 of the model-view matrix.
    pub fn current_normal(&self) -> Mat4 {
        let upper = Mat3::from_mat4(self.model_view.current());
        Mat4::from_mat3(upper.inverse().transpose())
    }
}
