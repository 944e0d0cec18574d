use std::borrow::Cow;

use glam::{Mat4, Vec3};

use crate::draw::primitives::{box_mesh, plane_mesh, sphere_mesh};
use crate::draw::shapes::{ellipse_points, rectangle_corners};
use crate::draw::{Mesh, PrimitiveMode, RenderMode};
use crate::error::Result;
use crate::scene::{DrawCmd, GeometryCmd, VertexAttributes};
use crate::style::FillMode;
use crate::transform::MatrixMode;

use super::{Backend, Renderer};

impl<B: Backend> Renderer<B> {
    fn submit_shape(&mut self, topology: PrimitiveMode, points: &[Vec3]) {
        let cmd = GeometryCmd {
            topology,
            render_mode: RenderMode::Fill,
            attributes: VertexAttributes::POSITION,
            positions: Cow::Borrowed(points),
            colors: Cow::Borrowed(&[]),
            tex_coords: Cow::Borrowed(&[]),
            normals: Cow::Borrowed(&[]),
            indices: Cow::Borrowed(&[]),
            texture: None,
            paint: self.paint(),
            matrices: self.matrix_uniforms(),
        };
        self.submit(DrawCmd::Geometry(cmd));
    }

    /// Filled shapes become `filled`; outlines become a line loop.
    fn submit_closed_shape(&mut self, filled: PrimitiveMode, points: &[Vec3]) {
        let topology = match self.styles.current().fill_mode {
            FillMode::Filled => filled,
            FillMode::Outline => PrimitiveMode::LineLoop,
        };
        self.submit_shape(topology, points);
    }

    fn mesh_render_mode(&self) -> RenderMode {
        match self.styles.current().fill_mode {
            FillMode::Filled => RenderMode::Fill,
            FillMode::Outline => RenderMode::Wireframe,
        }
    }

    // ── 2D ────────────────────────────────────────────────────────────────

    pub fn draw_line(&mut self, from: Vec3, to: Vec3) {
        self.submit_shape(PrimitiveMode::Lines, &[from, to]);
    }

    /// Honors the current rect mode.
    pub fn draw_rectangle(&mut self, x: f32, y: f32, z: f32, w: f32, h: f32) {
        let corners = rectangle_corners(x, y, z, w, h, self.styles.current().rect_mode);
        self.submit_closed_shape(PrimitiveMode::TriangleFan, &corners);
    }

    pub fn draw_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.submit_closed_shape(PrimitiveMode::Triangles, &[a, b, c]);
    }

    pub fn draw_circle(&mut self, center: Vec3, radius: f32) {
        self.draw_ellipse(center, radius * 2.0, radius * 2.0);
    }

    /// Ellipse of the given diameters, always centered on `center`.
    pub fn draw_ellipse(&mut self, center: Vec3, width: f32, height: f32) {
        let res = self.styles.current().circle_resolution;
        let points = ellipse_points(center, width * 0.5, height * 0.5, res);
        self.submit_closed_shape(PrimitiveMode::TriangleFan, &points);
    }

    // ── 3D ────────────────────────────────────────────────────────────────

    fn draw_placed_mesh(&mut self, mesh: &Mesh, placement: Mat4) -> Result<()> {
        let mode = self.mesh_render_mode();
        self.matrices.push(MatrixMode::ModelView);
        self.matrices.mult(MatrixMode::ModelView, placement);
        self.draw_mesh(mesh, mode);
        self.matrices.pop(MatrixMode::ModelView)
    }

    /// Plane centered on `position`, subdivided by the plane resolution.
    pub fn draw_plane(&mut self, position: Vec3, width: f32, height: f32) -> Result<()> {
        let res = self.resolutions.plane();
        let mesh = plane_mesh(1.0, 1.0, res.x, res.y);
        let placement = Mat4::from_translation(position) * Mat4::from_scale(Vec3::new(width, height, 1.0));
        self.draw_placed_mesh(&mesh, placement)
    }

    pub fn draw_sphere(&mut self, center: Vec3, radius: f32) -> Result<()> {
        let mesh = sphere_mesh(1.0, self.resolutions.sphere());
        let placement = Mat4::from_translation(center) * Mat4::from_scale(Vec3::splat(radius));
        self.draw_placed_mesh(&mesh, placement)
    }

    /// Box centered on `position`.
    pub fn draw_box(&mut self, position: Vec3, size: Vec3) -> Result<()> {
        let mesh = box_mesh(Vec3::ONE, self.resolutions.boxes());
        let placement = Mat4::from_translation(position) * Mat4::from_scale(size);
        self.draw_placed_mesh(&mesh, placement)
    }

    /// Colored x/y/z axis lines from the origin.
    pub fn draw_axis(&mut self, size: f32) {
        self.draw_mesh(&Mesh::axis(size), RenderMode::Fill);
    }
}
