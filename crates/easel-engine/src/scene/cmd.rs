use std::borrow::Cow;

use bitflags::bitflags;
use glam::{Vec2, Vec3};

use crate::binding::{MatrixUniforms, ResourceId};
use crate::draw::{PixelFormat, Polyline, PrimitiveMode, RenderMode};
use crate::paint::{ChannelWidth, Color};
use crate::style::{BlendMode, PolyWindingMode, Style};

bitflags! {
    /// Vertex attributes a backend should stream for one draw.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct VertexAttributes: u8 {
        const POSITION  = 1 << 0;
        const COLOR     = 1 << 1;
        const TEX_COORD = 1 << 2;
        const NORMAL    = 1 << 3;
    }
}

/// The style fields a backend needs to rasterize a command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PaintState {
    pub color: Color,
    pub line_width: f32,
    pub blend_mode: BlendMode,
    pub smoothing: bool,
}

impl PaintState {
    pub fn from_style(style: &Style) -> Self {
        Self {
            color: style.color,
            line_width: style.line_width,
            blend_mode: style.blend_mode,
            smoothing: style.smoothing,
        }
    }
}

/// Where the texels sampled by a textured draw come from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureSource {
    Image { image: ResourceId, channel_width: ChannelWidth },
    /// `fresh` is set when the source reported a new frame since the last
    /// draw, i.e. its planes need re-uploading.
    Video { video: ResourceId, format: PixelFormat, fresh: bool },
    /// Whatever texture is bound on slot 0.
    Bound { texture: ResourceId },
}

/// Vertex geometry ready for submission.
///
/// Attribute arrays not named in `attributes` are left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCmd<'a> {
    pub topology: PrimitiveMode,
    pub render_mode: RenderMode,
    pub attributes: VertexAttributes,
    pub positions: Cow<'a, [Vec3]>,
    pub colors: Cow<'a, [Color]>,
    pub tex_coords: Cow<'a, [Vec2]>,
    pub normals: Cow<'a, [Vec3]>,
    pub indices: Cow<'a, [u32]>,
    pub texture: Option<TextureSource>,
    pub paint: PaintState,
    pub matrices: MatrixUniforms,
}

impl GeometryCmd<'_> {
    pub fn into_owned(self) -> GeometryCmd<'static> {
        GeometryCmd {
            topology: self.topology,
            render_mode: self.render_mode,
            attributes: self.attributes,
            positions: Cow::Owned(self.positions.into_owned()),
            colors: Cow::Owned(self.colors.into_owned()),
            tex_coords: Cow::Owned(self.tex_coords.into_owned()),
            normals: Cow::Owned(self.normals.into_owned()),
            indices: Cow::Owned(self.indices.into_owned()),
            texture: self.texture,
            paint: self.paint,
            matrices: self.matrices,
        }
    }
}

/// Filled outline contours, tessellated by the backend with `winding`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd<'a> {
    pub contours: Cow<'a, [Polyline]>,
    pub winding: PolyWindingMode,
    pub paint: PaintState,
    pub matrices: MatrixUniforms,
}

impl PolygonCmd<'_> {
    pub fn into_owned(self) -> PolygonCmd<'static> {
        PolygonCmd {
            contours: Cow::Owned(self.contours.into_owned()),
            winding: self.winding,
            paint: self.paint,
            matrices: self.matrices,
        }
    }
}

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd<'a> {
    /// Fill the current viewport with a color.
    Clear(Color),
    Geometry(GeometryCmd<'a>),
    Polygon(PolygonCmd<'a>),
}

impl<'a> DrawCmd<'a> {
    pub fn into_owned(self) -> DrawCmd<'static> {
        match self {
            DrawCmd::Clear(c) => DrawCmd::Clear(c),
            DrawCmd::Geometry(g) => DrawCmd::Geometry(g.into_owned()),
            DrawCmd::Polygon(p) => DrawCmd::Polygon(p.into_owned()),
        }
    }

    #[inline]
    pub fn as_geometry(&self) -> Option<&GeometryCmd<'a>> {
        match self {
            DrawCmd::Geometry(g) => Some(g),
            _ => None,
        }
    }

    #[inline]
    pub fn as_polygon(&self) -> Option<&PolygonCmd<'a>> {
        match self {
            DrawCmd::Polygon(p) => Some(p),
            _ => None,
        }
    }
}
