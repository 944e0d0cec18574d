//! End-to-end behavior of the renderer against the recording backend.

use easel_engine::binding::{MatrixUniforms, OffscreenTarget, RenderTarget, ResourceId, Shader};
use easel_engine::coords::Rect;
use easel_engine::draw::{Image, Mesh, PrimitiveMode, RenderMode};
use easel_engine::error::StackKind;
use easel_engine::glam::{Mat4, Vec2, Vec3};
use easel_engine::paint::Color;
use easel_engine::render::Capabilities;
use easel_engine::scene::DrawList;
use easel_engine::style::StyleStack;
use easel_engine::transform::{Handedness, MatrixMode, MatrixStacks};
use easel_engine::view::{Orientation, ViewportManager, ViewportState};
use easel_engine::{RenderError, Renderer, RendererConfig};

fn renderer() -> Renderer<DrawList> {
    Renderer::new(DrawList::new(), RendererConfig::default())
}

// ── stack laws ────────────────────────────────────────────────────────────

#[test]
fn depth_is_pushes_minus_pops_and_base_is_never_popped() {
    // 1 = push, 0 = pop
    let script = [1, 1, 0, 1, 0, 0, 0, 1, 0];
    let mut matrices = MatrixStacks::new();
    let mut styles = StyleStack::default();
    let mut depth: usize = 1;

    for step in script {
        if step == 1 {
            matrices.push(MatrixMode::Projection);
            styles.push();
            depth += 1;
        } else if depth > 1 {
            matrices.pop(MatrixMode::Projection).unwrap();
            styles.pop().unwrap();
            depth -= 1;
        } else {
            assert_eq!(
                matrices.pop(MatrixMode::Projection),
                Err(RenderError::StackUnderflow {
                    stack: StackKind::Matrix(MatrixMode::Projection)
                })
            );
            assert_eq!(
                styles.pop(),
                Err(RenderError::StackUnderflow { stack: StackKind::Style })
            );
        }
        assert_eq!(matrices.depth(MatrixMode::Projection), depth);
        assert_eq!(styles.depth(), depth);
    }
}

#[test]
fn load_then_current_round_trips() {
    let m = Mat4::from_cols_array(&[
        1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
    ]);
    let mut r = renderer();
    for mode in MatrixMode::ALL {
        r.matrix_mode(mode);
        r.load_matrix(m);
        assert_eq!(r.current_matrix(mode), m);
    }
}

#[test]
fn push_mult_pop_restores_current() {
    let mut r = renderer();
    r.translate(3.0, 4.0, 5.0);
    let before = r.current_matrix(MatrixMode::ModelView);

    r.push_matrix();
    r.mult_matrix(Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::splat(2.0)));
    r.pop_matrix().unwrap();

    assert_eq!(r.current_matrix(MatrixMode::ModelView), before);
}

// ── mesh dispatch ─────────────────────────────────────────────────────────

fn full_mesh() -> Mesh {
    let mut m = Mesh::from_vertices(PrimitiveMode::Triangles, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
    m.colors = vec![Color::WHITE; 3];
    m.tex_coords = vec![Vec2::ZERO, Vec2::X, Vec2::Y];
    m.normals = vec![Vec3::Z; 3];
    m.indices = vec![0, 1, 2];
    m
}

#[test]
fn explicit_flags_match_preset_mesh_flags() {
    let mesh = full_mesh();
    let mut explicit = renderer();
    explicit.draw_mesh_with(&mesh, RenderMode::Wireframe, false, true, false);

    let mut preset = full_mesh();
    preset.enable_colors(false);
    preset.enable_textures(true);
    preset.enable_normals(false);
    let mut implicit = renderer();
    implicit.draw_mesh(&preset, RenderMode::Wireframe);

    assert_eq!(explicit.backend().items(), implicit.backend().items());
}

// ── render targets ────────────────────────────────────────────────────────

#[test]
fn nested_begin_end_restores_prior_state() {
    let a = OffscreenTarget::new(512.0, 512.0);
    let b = OffscreenTarget::new(128.0, 64.0);
    let mut r = renderer();
    r.start_render();
    r.viewport(Rect::new(10.0, 20.0, 300.0, 200.0), true);

    let viewport = r.viewport_state();
    let uniforms = r.matrix_uniforms();
    let style = r.style();

    r.begin(&a, true).unwrap();
    r.set_color(Color::BLACK);
    r.begin(&b, true).unwrap();
    assert_eq!(r.current_viewport().size, Vec2::new(128.0, 64.0));
    r.end(&b).unwrap();
    assert_eq!(r.current_viewport().size, Vec2::new(512.0, 512.0));
    r.end(&a).unwrap();

    assert_eq!(r.viewport_state(), viewport);
    assert_eq!(r.matrix_uniforms(), uniforms);
    assert_eq!(r.style(), style);
    assert_eq!(r.backend().viewport(), Some(viewport.native));
}

#[test]
fn ending_the_outer_target_first_is_unbalanced() {
    let a = OffscreenTarget::new(64.0, 64.0);
    let b = OffscreenTarget::new(32.0, 32.0);
    let mut r = renderer();
    r.begin(&a, true).unwrap();
    r.begin(&b, true).unwrap();

    let err = r.end(&a).unwrap_err();
    assert!(matches!(err, RenderError::UnbalancedBinding { found, .. } if found == a.id()));

    // State is untouched: the proper order still works.
    r.end(&b).unwrap();
    r.end(&a).unwrap();
}

// ── orientation ───────────────────────────────────────────────────────────

#[test]
fn quarter_turns_round_trip_the_logical_viewport() {
    let native = Rect::new(100.0, 50.0, 400.0, 300.0);
    let surface = Vec2::new(1024.0, 768.0);

    let mut cw = ViewportManager::new(ViewportState::new(surface, true, Orientation::Default, Handedness::Right));
    cw.set_native_viewport(native);
    let original = cw.current_viewport();

    cw.set_orientation(Orientation::Cw90, true);
    let turned = cw.current_viewport();
    assert_eq!(turned.size, Vec2::new(300.0, 400.0));

    // The turned rect, seen as native on the rotated surface, turned back.
    let mut ccw = ViewportManager::new(ViewportState::new(
        cw.state().logical_surface(),
        false,
        Orientation::Ccw90,
        Handedness::Right,
    ));
    ccw.set_native_viewport(turned);
    assert_eq!(ccw.current_viewport(), original);
}

#[test]
fn orientation_is_absolute() {
    let mut r = renderer();
    let original = r.current_viewport();
    r.set_orientation(Orientation::Cw90, true);
    assert_ne!(r.current_viewport(), original);
    r.set_orientation(Orientation::Default, true);
    assert_eq!(r.current_viewport(), original);
}

// ── anchors ───────────────────────────────────────────────────────────────

#[test]
fn centered_anchor_centers_the_image_on_the_draw_point() {
    let mut img: Image<u8> = Image::new(100, 100, 4);
    img.set_anchor_percent(0.5, 0.5);

    let mut r = renderer();
    r.draw_image((&img).into(), 300.0, 200.0);

    let quad = r.backend().geometry().next().unwrap();
    assert_eq!(quad.positions[0], Vec3::new(250.0, 150.0, 0.0));
    assert_eq!(quad.positions[2], Vec3::new(350.0, 250.0, 0.0));
}

#[test]
fn default_anchor_is_top_left() {
    let img: Image<u8> = Image::new(100, 100, 4);
    let mut r = renderer();
    r.draw_image((&img).into(), 300.0, 200.0);
    let quad = r.backend().geometry().next().unwrap();
    assert_eq!(quad.positions[0], Vec3::new(300.0, 200.0, 0.0));
}

// ── capability failures ───────────────────────────────────────────────────

struct NullShader(ResourceId);

impl Shader for NullShader {
    fn id(&self) -> ResourceId {
        self.0
    }
    fn upload_matrices(&self, _: &MatrixUniforms) {}
}

#[test]
fn failed_bind_leaves_every_stack_intact() {
    let shader = NullShader(ResourceId::next());
    let target = OffscreenTarget::new(64.0, 64.0);
    let mut r = Renderer::new(DrawList::with_capabilities(Capabilities::empty()), RendererConfig::default());
    let viewport = r.viewport_state();

    assert!(matches!(
        r.bind_shader(&shader),
        Err(RenderError::UnsupportedOperation { operation: "bind_shader", .. })
    ));
    assert!(r.begin(&target, true).is_err());

    assert_eq!(r.bindings().open_bindings(), 0);
    assert_eq!(r.bindings().target_depth(), 0);
    assert_eq!(r.viewport_state(), viewport);
    assert!(matches!(r.unbind_shader(&shader), Err(RenderError::UnbalancedBinding { .. })));
}
