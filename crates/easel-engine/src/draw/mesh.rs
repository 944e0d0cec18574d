use glam::{Vec2, Vec3};

use crate::paint::Color;

/// How consecutive vertices (or indices) are assembled into primitives.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveMode {
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
    Lines,
    LineStrip,
    LineLoop,
    Points,
}

/// Per-call override of a mesh's attribute usage flags.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshFeatures {
    pub use_colors: bool,
    pub use_textures: bool,
    pub use_normals: bool,
}

impl MeshFeatures {
    pub const ALL: MeshFeatures = MeshFeatures {
        use_colors: true,
        use_textures: true,
        use_normals: true,
    };
    pub const NONE: MeshFeatures = MeshFeatures {
        use_colors: false,
        use_textures: false,
        use_normals: false,
    };
}

/// Indexed vertex data with optional per-vertex attributes.
///
/// The `using_*` flags say whether an attribute should be streamed when the
/// mesh is drawn with its own settings. A flag has no effect when the
/// matching attribute array is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub mode: PrimitiveMode,
    pub vertices: Vec<Vec3>,
    pub colors: Vec<Color>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    use_colors: bool,
    use_textures: bool,
    use_normals: bool,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(PrimitiveMode::Triangles)
    }
}

impl Mesh {
    pub fn new(mode: PrimitiveMode) -> Self {
        Self {
            mode,
            vertices: Vec::new(),
            colors: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            use_colors: true,
            use_textures: true,
            use_normals: true,
        }
    }

    pub fn from_vertices(mode: PrimitiveMode, vertices: Vec<Vec3>) -> Self {
        Self {
            vertices,
            ..Self::new(mode)
        }
    }

    /// Three axis lines from the origin, colored red (x), green (y) and blue (z).
    pub fn axis(size: f32) -> Self {
        let mut mesh = Self::new(PrimitiveMode::Lines);
        let axes = [
            (Vec3::X, Color::new(1.0, 0.0, 0.0, 1.0)),
            (Vec3::Y, Color::new(0.0, 1.0, 0.0, 1.0)),
            (Vec3::Z, Color::new(0.0, 0.0, 1.0, 1.0)),
        ];
        for (dir, color) in axes {
            mesh.add_vertex(Vec3::ZERO);
            mesh.add_color(color);
            mesh.add_vertex(dir * size);
            mesh.add_color(color);
        }
        mesh
    }

    pub fn add_vertex(&mut self, v: Vec3) {
        self.vertices.push(v);
    }

    pub fn add_color(&mut self, c: Color) {
        self.colors.push(c);
    }

    pub fn add_tex_coord(&mut self, t: Vec2) {
        self.tex_coords.push(t);
    }

    pub fn add_normal(&mut self, n: Vec3) {
        self.normals.push(n);
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    #[inline]
    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    #[inline]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    #[inline]
    pub fn has_indices(&self) -> bool {
        !self.indices.is_empty()
    }

    // ── usage flags ───────────────────────────────────────────────────────

    #[inline]
    pub fn using_colors(&self) -> bool {
        self.use_colors
    }

    #[inline]
    pub fn using_textures(&self) -> bool {
        self.use_textures
    }

    #[inline]
    pub fn using_normals(&self) -> bool {
        self.use_normals
    }

    pub fn enable_colors(&mut self, on: bool) {
        self.use_colors = on;
    }

    pub fn enable_textures(&mut self, on: bool) {
        self.use_textures = on;
    }

    pub fn enable_normals(&mut self, on: bool) {
        self.use_normals = on;
    }

    pub fn features(&self) -> MeshFeatures {
        MeshFeatures {
            use_colors: self.use_colors,
            use_textures: self.use_textures,
            use_normals: self.use_normals,
        }
    }
}
