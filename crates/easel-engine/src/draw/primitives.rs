//! Tessellated 3D primitives.
//!
//! All builders produce indexed triangle meshes with normals and texture
//! coordinates, centered on the origin.

use glam::{UVec2, UVec3, Vec2, Vec3};

use crate::error::{check_resolution, Result};

use super::{Mesh, Node, PrimitiveMode};

/// A mesh placed in the scene by a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive {
    pub mesh: Mesh,
    pub node: Node,
}

impl Primitive {
    pub fn new(mesh: Mesh, node: Node) -> Self {
        Self { mesh, node }
    }
}

/// Tessellation settings used by the renderer's primitive draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Resolutions {
    plane: UVec2,
    sphere: u32,
    boxes: UVec3,
}

impl Default for Resolutions {
    fn default() -> Self {
        Self {
            plane: UVec2::new(6, 4),
            sphere: 20,
            boxes: UVec3::ONE,
        }
    }
}

impl Resolutions {
    /// Columns and rows of plane grids.
    #[inline]
    pub fn plane(&self) -> UVec2 {
        self.plane
    }

    #[inline]
    pub fn sphere(&self) -> u32 {
        self.sphere
    }

    /// Per-face subdivisions along width, height and depth.
    #[inline]
    pub fn boxes(&self) -> UVec3 {
        self.boxes
    }

    pub fn set_plane(&mut self, columns: i32, rows: i32) -> Result<()> {
        let columns = check_resolution("plane columns", columns)?;
        let rows = check_resolution("plane rows", rows)?;
        self.plane = UVec2::new(columns, rows);
        Ok(())
    }

    pub fn set_sphere(&mut self, res: i32) -> Result<()> {
        self.sphere = check_resolution("sphere", res)?;
        Ok(())
    }

    pub fn set_box(&mut self, width: i32, height: i32, depth: i32) -> Result<()> {
        let w = check_resolution("box width", width)?;
        let h = check_resolution("box height", height)?;
        let d = check_resolution("box depth", depth)?;
        self.boxes = UVec3::new(w, h, d);
        Ok(())
    }
}

/// Grid of `columns × rows` quads spanning `origin + [0,1]·u + [0,1]·v`.
fn push_grid(mesh: &mut Mesh, origin: Vec3, u: Vec3, v: Vec3, columns: u32, rows: u32) {
    let normal = u.cross(v).normalize_or_zero();
    let base = mesh.vertices.len() as u32;

    for row in 0..=rows {
        let t = row as f32 / rows as f32;
        for col in 0..=columns {
            let s = col as f32 / columns as f32;
            mesh.add_vertex(origin + u * s + v * t);
            mesh.add_normal(normal);
            mesh.add_tex_coord(Vec2::new(s, t));
        }
    }

    let stride = columns + 1;
    for row in 0..rows {
        for col in 0..columns {
            let i0 = base + row * stride + col;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            mesh.add_triangle(i0, i1, i3);
            mesh.add_triangle(i0, i3, i2);
        }
    }
}

/// Flat `width × height` plane in the xy plane, facing +z.
pub fn plane_mesh(width: f32, height: f32, columns: u32, rows: u32) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveMode::Triangles);
    let origin = Vec3::new(-width * 0.5, -height * 0.5, 0.0);
    push_grid(&mut mesh, origin, Vec3::X * width, Vec3::Y * height, columns.max(1), rows.max(1));
    mesh
}

/// UV sphere with `res` rings and `2 * res` segments.
pub fn sphere_mesh(radius: f32, res: u32) -> Mesh {
    let rings = res.max(2);
    let segments = rings * 2;
    let mut mesh = Mesh::new(PrimitiveMode::Triangles);

    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let polar = v * std::f32::consts::PI;
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let azimuth = u * std::f32::consts::TAU;
            let n = Vec3::new(polar.sin() * azimuth.cos(), polar.cos(), polar.sin() * azimuth.sin());
            mesh.add_vertex(n * radius);
            mesh.add_normal(n);
            mesh.add_tex_coord(Vec2::new(u, v));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let i0 = ring * stride + seg;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            mesh.add_triangle(i0, i2, i1);
            mesh.add_triangle(i1, i2, i3);
        }
    }
    mesh
}

/// Box of the given size; each face is subdivided per `res` along its own axes.
pub fn box_mesh(size: Vec3, res: UVec3) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveMode::Triangles);
    let h = size * 0.5;
    let (rx, ry, rz) = (res.x.max(1), res.y.max(1), res.z.max(1));
    let (x, y, z) = (Vec3::X * size.x, Vec3::Y * size.y, Vec3::Z * size.z);

    // front / back
    push_grid(&mut mesh, Vec3::new(-h.x, -h.y, h.z), x, y, rx, ry);
    push_grid(&mut mesh, Vec3::new(h.x, -h.y, -h.z), -x, y, rx, ry);
    // right / left
    push_grid(&mut mesh, Vec3::new(h.x, -h.y, h.z), -z, y, rz, ry);
    push_grid(&mut mesh, Vec3::new(-h.x, -h.y, -h.z), z, y, rz, ry);
    // top / bottom
    push_grid(&mut mesh, Vec3::new(-h.x, h.y, h.z), x, -z, rx, rz);
    push_grid(&mut mesh, Vec3::new(-h.x, -h.y, -h.z), x, z, rx, rz);
    mesh
}
