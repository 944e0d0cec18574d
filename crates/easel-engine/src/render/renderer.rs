use glam::{Mat4, Vec3};

use crate::binding::{BindingManager, MatrixUniforms};
use crate::coords::Rect;
use crate::draw::Resolutions;
use crate::error::{RenderError, Result, StackKind};
use crate::paint::Color;
use crate::scene::{DrawCmd, PaintState};
use crate::style::{BitmapTextMode, BlendMode, FillMode, PolyWindingMode, RectMode, Style, StyleStack};
use crate::transform::{Handedness, MatrixMode, MatrixStacks};
use crate::view::{
    screen_ortho, screen_perspective, Orientation, ScreenSetup, ViewportManager, ViewportState, DEFAULT_FOV,
};

use super::{Backend, RendererConfig};

/// Saved by `push_view`.
#[derive(Debug, Copy, Clone)]
struct ViewSnapshot {
    viewport: ViewportState,
    view: Mat4,
}

/// Rendering context: all per-context mutable state plus the backend that
/// executes draws.
///
/// Every stack starts with one base entry. Nothing is reset between frames;
/// callers balance their pushes and binds.
pub struct Renderer<B: Backend> {
    pub(super) backend: B,
    pub(super) matrices: MatrixStacks,
    pub(super) matrix_mode: MatrixMode,
    pub(super) viewport: ViewportManager,
    pub(super) styles: StyleStack,
    pub(super) bindings: BindingManager,
    views: Vec<ViewSnapshot>,
    pub(super) resolutions: Resolutions,
    background_auto: bool,
}

impl<B: Backend> Renderer<B> {
    pub fn new(backend: B, config: RendererConfig) -> Self {
        let state = ViewportState::new(
            glam::Vec2::new(config.width, config.height),
            config.v_flip,
            config.orientation,
            config.handedness,
        );
        let style = Style {
            background_color: config.background,
            ..Style::default()
        };

        let mut renderer = Self {
            backend,
            matrices: MatrixStacks::new(),
            matrix_mode: MatrixMode::ModelView,
            viewport: ViewportManager::new(state),
            styles: StyleStack::new(style),
            bindings: BindingManager::new(),
            views: Vec::new(),
            resolutions: Resolutions::default(),
            background_auto: config.background_auto,
        };
        renderer.sync_viewport();
        log::debug!(
            "renderer created on {} backend ({}x{})",
            renderer.backend.name(),
            config.width,
            config.height
        );
        renderer
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    #[inline]
    pub fn bindings(&self) -> &BindingManager {
        &self.bindings
    }

    pub(super) fn submit(&mut self, cmd: DrawCmd<'_>) {
        log::trace!("submit {:?}", std::mem::discriminant(&cmd));
        self.backend.submit(cmd);
    }

    pub(super) fn sync_viewport(&mut self) {
        self.backend.set_viewport(self.viewport.native_viewport());
    }

    pub(super) fn paint(&self) -> PaintState {
        PaintState::from_style(self.styles.current())
    }

    // ── frame lifecycle ───────────────────────────────────────────────────

    /// Begins a frame: full-surface viewport, screen perspective with the
    /// orientation folded into projection, and the automatic background clear.
    pub fn start_render(&mut self) {
        self.backend.start_render();
        self.viewport.set_viewport(Rect::new(0.0, 0.0, 0.0, 0.0), true);
        self.sync_viewport();
        self.setup_screen();
        if self.background_auto {
            let bg = self.styles.current().background_color;
            self.submit(DrawCmd::Clear(bg));
        }
    }

    /// Ends a frame. Leaked stack entries or bindings are reported, not reset.
    pub fn finish_render(&mut self) {
        for mode in MatrixMode::ALL {
            let depth = self.matrices.depth(mode);
            if depth > 1 {
                log::warn!("frame ended with {} unpopped {mode:?} matrices", depth - 1);
            }
        }
        if self.styles.depth() > 1 {
            log::warn!("frame ended with {} unpopped styles", self.styles.depth() - 1);
        }
        if !self.views.is_empty() {
            log::warn!("frame ended with {} unpopped views", self.views.len());
        }
        let open = self.bindings.open_bindings();
        if open > 0 {
            log::warn!("frame ended with {open} open bindings");
        }
        self.backend.finish_render();
    }

    /// Default screen perspective for the current viewport, then folds the
    /// orientation matrix into the projection channel.
    pub fn setup_screen(&mut self) {
        self.setup_screen_perspective(0.0, 0.0, DEFAULT_FOV, 0.0, 0.0);
        let oriented = self.viewport.orientation_matrix() * self.matrices.current(MatrixMode::Projection);
        self.matrices.load(MatrixMode::Projection, oriented);
    }

    /// Loads a perspective whose z = 0 plane maps one unit to one pixel.
    ///
    /// Non-positive sizes use the viewport's; zero near/far derive from the
    /// eye distance. Nothing is pushed.
    pub fn setup_screen_perspective(&mut self, width: f32, height: f32, fov: f32, near: f32, far: f32) {
        let vp = self.viewport.current_viewport().size;
        let setup = screen_perspective(vp, width, height, fov, near, far, self.viewport.handedness());
        self.apply_screen_setup(setup);
    }

    /// Loads an orthographic projection over `[0, w] × [0, h]`.
    pub fn setup_screen_ortho(&mut self, width: f32, height: f32, near: f32, far: f32) {
        let vp = self.viewport.current_viewport().size;
        let setup = screen_ortho(vp, width, height, near, far, self.viewport.handedness());
        self.apply_screen_setup(setup);
    }

    fn apply_screen_setup(&mut self, setup: ScreenSetup) {
        self.matrices.load(MatrixMode::Projection, setup.projection);
        self.matrices.load_view_matrix(setup.view);
    }

    // ── matrices ──────────────────────────────────────────────────────────

    /// Selects the channel the following matrix calls act on.
    pub fn matrix_mode(&mut self, mode: MatrixMode) {
        self.matrix_mode = mode;
    }

    #[inline]
    pub fn current_matrix_mode(&self) -> MatrixMode {
        self.matrix_mode
    }

    pub fn push_matrix(&mut self) {
        self.matrices.push(self.matrix_mode);
    }

    pub fn pop_matrix(&mut self) -> Result<()> {
        self.matrices.pop(self.matrix_mode)
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.matrices.translate(self.matrix_mode, Vec3::new(x, y, z));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.matrices.scale(self.matrix_mode, Vec3::new(x, y, z));
    }

    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        let handedness = self.viewport.handedness();
        self.matrices.rotate(self.matrix_mode, handedness, degrees, axis);
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.rotate(degrees, Vec3::X);
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.rotate(degrees, Vec3::Y);
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.rotate(degrees, Vec3::Z);
    }

    pub fn load_identity_matrix(&mut self) {
        self.matrices.load(self.matrix_mode, Mat4::IDENTITY);
    }

    pub fn load_matrix(&mut self, m: Mat4) {
        self.matrices.load(self.matrix_mode, m);
    }

    pub fn mult_matrix(&mut self, m: Mat4) {
        self.matrices.mult(self.matrix_mode, m);
    }

    pub fn load_view_matrix(&mut self, m: Mat4) {
        self.matrices.load_view_matrix(m);
    }

    pub fn mult_view_matrix(&mut self, m: Mat4) {
        self.matrices.mult_view_matrix(m);
    }

    #[inline]
    pub fn current_matrix(&self, mode: MatrixMode) -> Mat4 {
        self.matrices.current(mode)
    }

    #[inline]
    pub fn current_view_matrix(&self) -> Mat4 {
        self.matrices.current_view()
    }

    #[inline]
    pub fn current_normal_matrix(&self) -> Mat4 {
        self.matrices.current_normal()
    }

    pub fn current_orientation_matrix(&self) -> Mat4 {
        self.viewport.orientation_matrix()
    }

    /// Direct access to the channel stacks.
    #[inline]
    pub fn matrices(&self) -> &MatrixStacks {
        &self.matrices
    }

    #[inline]
    pub fn matrices_mut(&mut self) -> &mut MatrixStacks {
        &mut self.matrices
    }

    pub fn matrix_uniforms(&self) -> MatrixUniforms {
        let model_view = self.matrices.current(MatrixMode::ModelView);
        let projection = self.matrices.current(MatrixMode::Projection);
        MatrixUniforms {
            model_view,
            projection,
            model_view_projection: projection * model_view,
            normal: self.matrices.current_normal(),
            texture: self.matrices.current(MatrixMode::Texture),
            view: self.matrices.current_view(),
        }
    }

    // ── viewport ──────────────────────────────────────────────────────────

    /// Sets the viewport from a logical rectangle; see
    /// [`ViewportManager::set_viewport`].
    pub fn viewport(&mut self, rect: Rect, v_flip: bool) {
        self.viewport.set_viewport(rect, v_flip);
        self.sync_viewport();
    }

    #[inline]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    #[inline]
    pub fn current_viewport(&self) -> Rect {
        self.viewport.current_viewport()
    }

    #[inline]
    pub fn native_viewport(&self) -> Rect {
        self.viewport.native_viewport()
    }

    #[inline]
    pub fn viewport_width(&self) -> f32 {
        self.viewport.viewport_width()
    }

    #[inline]
    pub fn viewport_height(&self) -> f32 {
        self.viewport.viewport_height()
    }

    #[inline]
    pub fn is_v_flipped(&self) -> bool {
        self.viewport.is_v_flipped()
    }

    /// Window resize: the viewport is reset to the whole surface.
    pub fn set_surface_size(&mut self, width: f32, height: f32) {
        self.viewport.set_surface_size(glam::Vec2::new(width, height));
        self.sync_viewport();
    }

    /// Absolute: replaces the previous orientation rather than composing.
    /// `Cw90` and `Ccw90` are inverses only across surfaces: the logical rect
    /// produced by one, read as native on the rotated surface, maps back
    /// through the other.
    pub fn set_orientation(&mut self, orientation: Orientation, v_flip: bool) {
        log::debug!("orientation {orientation:?}, v_flip {v_flip}");
        self.viewport.set_orientation(orientation, v_flip);
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.viewport.orientation()
    }

    pub fn set_coord_handedness(&mut self, handedness: Handedness) {
        self.viewport.set_handedness(handedness);
    }

    #[inline]
    pub fn coord_handedness(&self) -> Handedness {
        self.viewport.handedness()
    }

    /// Saves the viewport, the projection and model-view tops, and the view
    /// matrix.
    pub fn push_view(&mut self) {
        self.views.push(ViewSnapshot {
            viewport: self.viewport.state(),
            view: self.matrices.current_view(),
        });
        self.matrices.push(MatrixMode::Projection);
        self.matrices.push(MatrixMode::ModelView);
    }

    /// Fails unless both the model-view and projection channels have an
    /// entry above their base.
    pub(super) fn check_view_matrices(&self) -> Result<()> {
        for mode in [MatrixMode::ModelView, MatrixMode::Projection] {
            if self.matrices.depth(mode) < 2 {
                return Err(RenderError::StackUnderflow {
                    stack: StackKind::Matrix(mode),
                });
            }
        }
        Ok(())
    }

    /// Restores what the matching `push_view` saved. Fails without side
    /// effects when the view or either matrix channel would underflow.
    pub fn pop_view(&mut self) -> Result<()> {
        if self.views.is_empty() {
            return Err(RenderError::StackUnderflow { stack: StackKind::View });
        }
        self.check_view_matrices()?;
        let snapshot = self
            .views
            .pop()
            .ok_or(RenderError::StackUnderflow { stack: StackKind::View })?;
        self.matrices.pop(MatrixMode::ModelView)?;
        self.matrices.pop(MatrixMode::Projection)?;
        self.matrices.restore_view(snapshot.view);
        self.viewport.restore(snapshot.viewport);
        self.sync_viewport();
        Ok(())
    }

    // ── style ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn style(&self) -> Style {
        *self.styles.current()
    }

    pub fn set_style(&mut self, style: Style) {
        self.styles.set(style);
    }

    pub fn push_style(&mut self) {
        self.styles.push();
    }

    pub fn pop_style(&mut self) -> Result<()> {
        self.styles.pop()
    }

    #[inline]
    pub fn styles(&self) -> &StyleStack {
        &self.styles
    }

    /// All style setters, including the color forms, act on the top entry.
    #[inline]
    pub fn styles_mut(&mut self) -> &mut StyleStack {
        &mut self.styles
    }

    pub fn set_color(&mut self, color: Color) {
        self.styles.set_color(color);
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.styles.set_fill_mode(mode);
    }

    pub fn set_rect_mode(&mut self, mode: RectMode) {
        self.styles.set_rect_mode(mode);
    }

    pub fn set_poly_mode(&mut self, mode: PolyWindingMode) {
        self.styles.set_poly_mode(mode);
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.styles.set_blend_mode(mode);
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.styles.set_line_width(width);
    }

    pub fn set_line_smoothing(&mut self, enabled: bool) {
        self.styles.set_smoothing(enabled);
    }

    pub fn set_bitmap_text_mode(&mut self, mode: BitmapTextMode) {
        self.styles.set_bitmap_text_mode(mode);
    }

    pub fn set_circle_resolution(&mut self, res: i32) -> Result<()> {
        self.styles.set_circle_resolution(res)
    }

    pub fn set_curve_resolution(&mut self, res: i32) -> Result<()> {
        self.styles.set_curve_resolution(res)
    }

    // ── background ────────────────────────────────────────────────────────

    #[inline]
    pub fn background_color(&self) -> Color {
        self.styles.current().background_color
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.styles.set_background_color(color);
    }

    pub fn set_background_auto(&mut self, auto: bool) {
        self.background_auto = auto;
    }

    #[inline]
    pub fn background_auto(&self) -> bool {
        self.background_auto
    }

    /// Stores `color` as the background and clears with it.
    pub fn background(&mut self, color: Color) {
        self.styles.set_background_color(color);
        self.clear(color);
    }

    pub fn background_gray(&mut self, brightness: u8) {
        self.background(Color::gray8(brightness));
    }

    pub fn background_hex(&mut self, hex: u32, alpha: u8) {
        self.background(Color::from_hex(hex).with_alpha8(alpha));
    }

    pub fn background_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.background(Color::from_rgba8(r, g, b, a));
    }

    /// Clears without touching the stored background.
    pub fn clear(&mut self, color: Color) {
        self.submit(DrawCmd::Clear(color));
    }

    /// Gray clear; `brightness` and `alpha` are unit floats.
    pub fn clear_gray(&mut self, brightness: f32, alpha: f32) {
        self.clear(Color::from_unit(brightness, brightness, brightness, alpha));
    }

    // ── 3D resolutions ────────────────────────────────────────────────────

    #[inline]
    pub fn resolutions(&self) -> Resolutions {
        self.resolutions
    }

    pub fn set_plane_resolution(&mut self, columns: i32, rows: i32) -> Result<()> {
        self.resolutions.set_plane(columns, rows)
    }

    pub fn set_sphere_resolution(&mut self, res: i32) -> Result<()> {
        self.resolutions.set_sphere(res)
    }

    pub fn set_box_resolution(&mut self, width: i32, height: i32, depth: i32) -> Result<()> {
        self.resolutions.set_box(width, height, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawList;

    fn renderer() -> Renderer<DrawList> {
        Renderer::new(DrawList::new(), RendererConfig::default())
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn start_render_clears_with_background() {
        let mut r = renderer();
        r.start_render();
        assert_eq!(r.backend().items()[0].cmd, DrawCmd::Clear(Color::gray8(60)));
    }

    #[test]
    fn start_render_without_background_auto_submits_nothing() {
        let mut r = renderer();
        r.set_background_auto(false);
        r.start_render();
        assert!(r.backend().items().is_empty());
    }

    #[test]
    fn finish_render_leaves_leaked_state_alone() {
        let mut r = renderer();
        r.push_matrix();
        r.push_style();
        r.finish_render();
        assert_eq!(r.matrices().depth(MatrixMode::ModelView), 2);
        assert_eq!(r.styles().depth(), 2);
        assert_eq!(r.backend().frames(), 1);
    }

    // ── matrices ──────────────────────────────────────────────────────────

    #[test]
    fn matrix_calls_follow_the_selected_mode() {
        let mut r = renderer();
        r.matrix_mode(MatrixMode::Texture);
        r.translate(1.0, 2.0, 0.0);
        assert_eq!(
            r.current_matrix(MatrixMode::Texture),
            Mat4::from_translation(Vec3::new(1.0, 2.0, 0.0))
        );
        assert_eq!(r.current_matrix(MatrixMode::ModelView), Mat4::IDENTITY);
    }

    #[test]
    fn left_handed_rotation_negates_the_angle() {
        let mut r = renderer();
        r.rotate_z(90.0);
        let right = r.current_matrix(MatrixMode::ModelView);

        r.load_identity_matrix();
        r.set_coord_handedness(Handedness::Left);
        r.rotate_z(-90.0);
        assert!(r.current_matrix(MatrixMode::ModelView).abs_diff_eq(right, 1e-6));
    }

    #[test]
    fn pop_matrix_underflow_is_an_error() {
        let mut r = renderer();
        assert_eq!(
            r.pop_matrix(),
            Err(RenderError::StackUnderflow {
                stack: StackKind::Matrix(MatrixMode::ModelView)
            })
        );
    }

    #[test]
    fn setup_screen_folds_orientation_into_projection() {
        let mut r = renderer();
        r.setup_screen_perspective(0.0, 0.0, DEFAULT_FOV, 0.0, 0.0);
        let plain = r.current_matrix(MatrixMode::Projection);
        r.setup_screen();
        let folded = r.current_matrix(MatrixMode::Projection);
        assert!(folded.abs_diff_eq(r.current_orientation_matrix() * plain, 1e-6));
    }

    // ── views ─────────────────────────────────────────────────────────────

    #[test]
    fn push_pop_view_restores_viewport_and_matrices() {
        let mut r = renderer();
        r.setup_screen();
        let before = (r.viewport_state(), r.matrix_uniforms());

        r.push_view();
        r.viewport(Rect::new(10.0, 10.0, 100.0, 100.0), true);
        r.setup_screen_ortho(0.0, 0.0, -1.0, 1.0);
        r.pop_view().unwrap();

        assert_eq!((r.viewport_state(), r.matrix_uniforms()), before);
        assert_eq!(r.backend().viewport(), Some(before.0.native));
    }

    #[test]
    fn pop_view_without_push_underflows() {
        let mut r = renderer();
        assert_eq!(
            r.pop_view(),
            Err(RenderError::StackUnderflow { stack: StackKind::View })
        );
    }

    #[test]
    fn failed_pop_view_keeps_the_snapshot() {
        let mut r = renderer();
        let before = r.viewport_state();
        r.push_view();
        r.viewport(Rect::new(5.0, 5.0, 50.0, 50.0), true);
        r.pop_matrix().unwrap();

        assert_eq!(
            r.pop_view(),
            Err(RenderError::StackUnderflow {
                stack: StackKind::Matrix(MatrixMode::ModelView)
            })
        );
        assert_eq!(r.matrices().depth(MatrixMode::Projection), 2);

        r.push_matrix();
        r.pop_view().unwrap();
        assert_eq!(r.viewport_state(), before);
        assert_eq!(r.matrices().depth(MatrixMode::Projection), 1);
    }

    // ── style ─────────────────────────────────────────────────────────────

    #[test]
    fn background_updates_style_and_clears() {
        let mut r = renderer();
        r.background_rgba(255, 0, 0, 255);
        assert_eq!(r.background_color(), Color::from_rgb8(255, 0, 0));
        assert_eq!(r.backend().items().len(), 1);

        r.clear_gray(1.0, 1.0);
        assert_eq!(r.background_color(), Color::from_rgb8(255, 0, 0));
    }

    #[test]
    fn resolution_setters_validate() {
        let mut r = renderer();
        assert!(r.set_circle_resolution(0).is_err());
        assert!(r.set_sphere_resolution(-3).is_err());
        r.set_sphere_resolution(12).unwrap();
        assert_eq!(r.resolutions().sphere(), 12);
    }
}
