//! Translation of renderer state into programmable-pipeline (wgpu) terms.
//!
//! A wgpu backend builds its pipelines and buffers from these helpers so
//! that blend modes, topologies and vertex layouts stay in one place.

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

use crate::binding::MatrixUniforms;
use crate::draw::{PrimitiveMode, RenderMode};
use crate::scene::{GeometryCmd, VertexAttributes};
use crate::style::BlendMode;

// ── blend ─────────────────────────────────────────────────────────────────

fn component(
    src_factor: wgpu::BlendFactor,
    dst_factor: wgpu::BlendFactor,
    operation: wgpu::BlendOperation,
) -> wgpu::BlendComponent {
    wgpu::BlendComponent {
        src_factor,
        dst_factor,
        operation,
    }
}

/// Blend state for a style blend mode; `None` disables blending.
///
/// Colors are straight (not premultiplied) alpha.
pub fn blend_state(mode: BlendMode) -> Option<wgpu::BlendState> {
    use wgpu::BlendFactor as F;
    use wgpu::BlendOperation as Op;

    let color = match mode {
        BlendMode::Disabled => return None,
        BlendMode::Alpha => component(F::SrcAlpha, F::OneMinusSrcAlpha, Op::Add),
        BlendMode::Add => component(F::SrcAlpha, F::One, Op::Add),
        BlendMode::Multiply => component(F::Dst, F::OneMinusSrcAlpha, Op::Add),
        BlendMode::Screen => component(F::OneMinusDst, F::One, Op::Add),
        BlendMode::Subtract => component(F::SrcAlpha, F::One, Op::ReverseSubtract),
    };
    Some(wgpu::BlendState {
        color,
        alpha: component(F::One, F::OneMinusSrcAlpha, Op::Add),
    })
}

// ── primitive state ───────────────────────────────────────────────────────

/// wgpu topology for a draw. Fans and loops are submitted as lists/strips
/// after [`list_indices`] rewrites their indices.
pub fn topology(mode: PrimitiveMode, render_mode: RenderMode) -> wgpu::PrimitiveTopology {
    if render_mode == RenderMode::Points {
        return wgpu::PrimitiveTopology::PointList;
    }
    match mode {
        PrimitiveMode::Triangles | PrimitiveMode::TriangleFan => wgpu::PrimitiveTopology::TriangleList,
        PrimitiveMode::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        PrimitiveMode::Lines => wgpu::PrimitiveTopology::LineList,
        PrimitiveMode::LineStrip | PrimitiveMode::LineLoop => wgpu::PrimitiveTopology::LineStrip,
        PrimitiveMode::Points => wgpu::PrimitiveTopology::PointList,
    }
}

/// Wireframe keeps the triangle topology and rasterizes edges only.
/// `PolygonMode::Line` needs `wgpu::Features::POLYGON_MODE_LINE`.
pub fn primitive_state(mode: PrimitiveMode, render_mode: RenderMode) -> wgpu::PrimitiveState {
    let topology = topology(mode, render_mode);
    let polygon_mode = match render_mode {
        RenderMode::Wireframe => wgpu::PolygonMode::Line,
        RenderMode::Points | RenderMode::Fill => wgpu::PolygonMode::Fill,
    };
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Features a device needs to rasterize `render_mode`.
pub fn required_features(render_mode: RenderMode) -> wgpu::Features {
    match render_mode {
        RenderMode::Wireframe => wgpu::Features::POLYGON_MODE_LINE,
        RenderMode::Points | RenderMode::Fill => wgpu::Features::empty(),
    }
}

/// Index buffer for `mode` in the topology returned by [`topology`].
///
/// Non-indexed geometry gets sequential indices.
pub fn list_indices(mode: PrimitiveMode, vertex_count: usize, indices: &[u32]) -> Cow<'_, [u32]> {
    let source: Cow<'_, [u32]> = if indices.is_empty() {
        Cow::Owned((0..vertex_count as u32).collect())
    } else {
        Cow::Borrowed(indices)
    };

    match mode {
        PrimitiveMode::TriangleFan if source.len() >= 3 => {
            let hub = source[0];
            let fan = source
                .windows(2)
                .skip(1)
                .flat_map(|w| [hub, w[0], w[1]])
                .collect();
            Cow::Owned(fan)
        }
        PrimitiveMode::LineLoop if source.len() >= 2 => {
            let mut closed = source.into_owned();
            closed.push(closed[0]);
            Cow::Owned(closed)
        }
        _ => source,
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Interleaved vertex; attributes the command does not stream are filled
/// with defaults (paint color, zero uv, +z normal).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub normal: [f32; 3],
}

impl PackedVertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
        2 => Float32x2,
        3 => Float32x3
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PackedVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub fn pack_vertices(cmd: &GeometryCmd<'_>) -> Vec<PackedVertex> {
    let attrs = cmd.attributes;
    let paint = cmd.paint.color.to_array();
    cmd.positions
        .iter()
        .enumerate()
        .map(|(i, p)| PackedVertex {
            position: p.to_array(),
            color: attrs
                .contains(VertexAttributes::COLOR)
                .then(|| cmd.colors.get(i))
                .flatten()
                .map_or(paint, |c| c.to_array()),
            tex_coord: attrs
                .contains(VertexAttributes::TEX_COORD)
                .then(|| cmd.tex_coords.get(i))
                .flatten()
                .map_or([0.0; 2], |t| t.to_array()),
            normal: attrs
                .contains(VertexAttributes::NORMAL)
                .then(|| cmd.normals.get(i))
                .flatten()
                .map_or([0.0, 0.0, 1.0], |n| n.to_array()),
        })
        .collect()
}

/// Matrix uniform block, std140-compatible.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MatrixBlock {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub model_view_projection: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub texture: [[f32; 4]; 4],
}

impl From<&MatrixUniforms> for MatrixBlock {
    fn from(m: &MatrixUniforms) -> Self {
        Self {
            model_view: m.model_view.to_cols_array_2d(),
            projection: m.projection.to_cols_array_2d(),
            model_view_projection: m.model_view_projection.to_cols_array_2d(),
            normal: m.normal.to_cols_array_2d(),
            texture: m.texture.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── blend ─────────────────────────────────────────────────────────────

    #[test]
    fn disabled_blend_has_no_state() {
        assert!(blend_state(BlendMode::Disabled).is_none());
    }

    #[test]
    fn subtract_reverses_the_operation() {
        let s = blend_state(BlendMode::Subtract).unwrap();
        assert_eq!(s.color.operation, wgpu::BlendOperation::ReverseSubtract);
        assert_eq!(s.color.dst_factor, wgpu::BlendFactor::One);
    }

    #[test]
    fn alpha_blend_is_straight_alpha() {
        let s = blend_state(BlendMode::Alpha).unwrap();
        assert_eq!(s.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(s.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    // ── topology ──────────────────────────────────────────────────────────

    #[test]
    fn wireframe_keeps_triangle_topology() {
        let s = primitive_state(PrimitiveMode::Triangles, RenderMode::Wireframe);
        assert_eq!(s.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(s.polygon_mode, wgpu::PolygonMode::Line);
    }

    #[test]
    fn fan_becomes_triangle_list() {
        let idx = list_indices(PrimitiveMode::TriangleFan, 4, &[]);
        assert_eq!(&*idx, &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn loop_closes_back_to_first_index() {
        let idx = list_indices(PrimitiveMode::LineLoop, 0, &[4, 5, 6]);
        assert_eq!(&*idx, &[4, 5, 6, 4]);
    }

    #[test]
    fn wireframe_needs_line_polygon_mode() {
        assert_eq!(required_features(RenderMode::Wireframe), wgpu::Features::POLYGON_MODE_LINE);
        assert!(required_features(RenderMode::Fill).is_empty());
        assert!(required_features(RenderMode::Points).is_empty());
    }

    // ── GPU types ─────────────────────────────────────────────────────────

    fn recorded_triangle(use_colors: bool) -> GeometryCmd<'static> {
        use glam::Vec3;

        use crate::draw::Mesh;
        use crate::paint::Color;
        use crate::render::{Renderer, RendererConfig};
        use crate::scene::DrawList;

        let mut mesh = Mesh::from_vertices(PrimitiveMode::Triangles, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        mesh.colors = vec![Color::BLACK; 3];
        let mut r = Renderer::new(DrawList::new(), RendererConfig::default());
        r.set_color(Color::new(1.0, 0.5, 0.25, 1.0));
        r.draw_mesh_with(&mesh, RenderMode::Fill, use_colors, false, true);
        r.backend().geometry().next().cloned().unwrap()
    }

    #[test]
    fn packing_falls_back_to_paint_color_and_z_normal() {
        let cmd = recorded_triangle(false);
        let packed = pack_vertices(&cmd);
        assert_eq!(packed.len(), cmd.positions.len());
        for v in &packed {
            assert_eq!(v.color, [1.0, 0.5, 0.25, 1.0]);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
            assert_eq!(v.tex_coord, [0.0, 0.0]);
        }
        assert_eq!(packed[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn packing_streams_enabled_colors() {
        let packed = pack_vertices(&recorded_triangle(true));
        assert!(packed.iter().all(|v| v.color == [0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn matrix_block_keeps_column_order() {
        use glam::{Mat4, Vec3};

        let translate = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniforms = MatrixUniforms {
            model_view: translate,
            projection: Mat4::IDENTITY,
            model_view_projection: translate,
            normal: Mat4::IDENTITY,
            texture: Mat4::from_scale(Vec3::splat(2.0)),
            view: Mat4::IDENTITY,
        };
        let block = MatrixBlock::from(&uniforms);
        assert_eq!(block.model_view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(block.model_view, uniforms.model_view.to_cols_array_2d());
        assert_eq!(block.texture[0][0], 2.0);
        assert_eq!(std::mem::size_of::<MatrixBlock>(), 5 * 64);
    }

    #[test]
    fn packed_vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<PackedVertex>(), 12 * 4);
        assert_eq!(PackedVertex::layout().attributes.len(), 4);
    }
}
