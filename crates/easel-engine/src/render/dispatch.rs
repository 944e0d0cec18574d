use std::borrow::Cow;

use glam::{Vec2, Vec3};

use crate::binding::BindingKind;
use crate::coords::Rect;
use crate::draw::{Drawable, ImageRef, Mesh, Node, Path, Polyline, Primitive, PrimitiveMode, RenderMode, VideoSource};
use crate::error::Result;
use crate::scene::{DrawCmd, GeometryCmd, PaintState, PolygonCmd, TextureSource, VertexAttributes};
use crate::transform::MatrixMode;

use super::{Backend, Renderer};

/// Two triangles over a quad's corners (TL, TR, BR, BL).
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Attributes streamed for a mesh draw.
///
/// An attribute is streamed only when requested and present in the mesh.
pub fn mesh_attributes(mesh: &Mesh, use_colors: bool, use_textures: bool, use_normals: bool) -> VertexAttributes {
    let mut attrs = VertexAttributes::POSITION;
    attrs.set(VertexAttributes::COLOR, use_colors && mesh.has_colors());
    attrs.set(VertexAttributes::TEX_COORD, use_textures && mesh.has_tex_coords());
    attrs.set(VertexAttributes::NORMAL, use_normals && mesh.has_normals());
    attrs
}

impl<B: Backend> Renderer<B> {
    /// Single entry point over every drawable kind.
    pub fn draw(&mut self, drawable: Drawable<'_>) -> Result<()> {
        match drawable {
            Drawable::Polyline(line) => self.draw_polyline(line),
            Drawable::Path { path, offset: None } => self.draw_path(path),
            Drawable::Path {
                path,
                offset: Some(at),
            } => return self.draw_path_at(path, at.x, at.y),
            Drawable::Mesh {
                mesh,
                mode,
                features: None,
            } => self.draw_mesh(mesh, mode),
            Drawable::Mesh {
                mesh,
                mode,
                features: Some(f),
            } => self.draw_mesh_with(mesh, mode, f.use_colors, f.use_textures, f.use_normals),
            Drawable::Primitive { primitive, mode } => return self.draw_primitive(primitive, mode),
            Drawable::Node(node) => return self.draw_node(node),
            Drawable::Image {
                image,
                dest,
                z,
                source,
            } => self.draw_image_subsection(image, dest, z, source),
            Drawable::Video { video, dest } => self.draw_video(video, dest),
        }
        Ok(())
    }

    fn line_geometry<'a>(&self, points: &'a [Vec3], closed: bool, paint: PaintState) -> GeometryCmd<'a> {
        GeometryCmd {
            topology: if closed {
                PrimitiveMode::LineLoop
            } else {
                PrimitiveMode::LineStrip
            },
            render_mode: RenderMode::Fill,
            attributes: VertexAttributes::POSITION,
            positions: Cow::Borrowed(points),
            colors: Cow::Borrowed(&[]),
            tex_coords: Cow::Borrowed(&[]),
            normals: Cow::Borrowed(&[]),
            indices: Cow::Borrowed(&[]),
            texture: None,
            paint,
            matrices: self.matrix_uniforms(),
        }
    }

    // ── polylines and paths ───────────────────────────────────────────────

    pub fn draw_polyline(&mut self, line: &Polyline) {
        if line.len() < 2 {
            return;
        }
        let cmd = self.line_geometry(&line.points, line.closed, self.paint());
        self.submit(DrawCmd::Geometry(cmd));
    }

    /// Fills and strokes the path with its own colors.
    ///
    /// The current style is only consulted for blending, smoothing and the
    /// curve resolution when the path has none.
    pub fn draw_path(&mut self, path: &Path) {
        let resolution = path
            .curve_resolution
            .unwrap_or(self.styles.current().curve_resolution);
        let outlines = path.outlines(resolution);
        if outlines.is_empty() {
            return;
        }
        let base = self.paint();

        if let Some(fill) = path.fill {
            let cmd = PolygonCmd {
                contours: Cow::Borrowed(&outlines[..]),
                winding: path.winding,
                paint: PaintState { color: fill, ..base },
                matrices: self.matrix_uniforms(),
            };
            self.submit(DrawCmd::Polygon(cmd));
        }

        if let Some(stroke) = path.stroke {
            let paint = PaintState {
                color: stroke.color,
                line_width: stroke.width,
                ..base
            };
            for line in &outlines {
                let cmd = self.line_geometry(&line.points, line.closed, paint);
                self.submit(DrawCmd::Geometry(cmd));
            }
        }
    }

    /// Draws `path` offset by `(x, y)` through the model-view matrix; the
    /// path's own points are never moved.
    pub fn draw_path_at(&mut self, path: &Path, x: f32, y: f32) -> Result<()> {
        self.matrices.push(MatrixMode::ModelView);
        self.matrices.translate(MatrixMode::ModelView, Vec3::new(x, y, 0.0));
        self.draw_path(path);
        self.matrices.pop(MatrixMode::ModelView)
    }

    // ── meshes ────────────────────────────────────────────────────────────

    /// Draws with the mesh's own usage flags.
    pub fn draw_mesh(&mut self, mesh: &Mesh, mode: RenderMode) {
        self.draw_mesh_with(mesh, mode, mesh.using_colors(), mesh.using_textures(), mesh.using_normals());
    }

    /// Wireframe submits the fill data unchanged; only the backend's
    /// rasterization differs.
    pub fn draw_mesh_with(
        &mut self,
        mesh: &Mesh,
        mode: RenderMode,
        use_colors: bool,
        use_textures: bool,
        use_normals: bool,
    ) {
        if mesh.is_empty() {
            return;
        }
        let attributes = mesh_attributes(mesh, use_colors, use_textures, use_normals);
        let texture = attributes
            .contains(VertexAttributes::TEX_COORD)
            .then(|| self.bound_texture())
            .flatten();

        fn streamed<'a, T: Clone>(on: bool, data: &'a [T]) -> Cow<'a, [T]> {
            if on { Cow::Borrowed(data) } else { Cow::Borrowed(&[]) }
        }

        let cmd = GeometryCmd {
            topology: mesh.mode,
            render_mode: mode,
            attributes,
            positions: Cow::Borrowed(&mesh.vertices[..]),
            colors: streamed(attributes.contains(VertexAttributes::COLOR), &mesh.colors),
            tex_coords: streamed(attributes.contains(VertexAttributes::TEX_COORD), &mesh.tex_coords),
            normals: streamed(attributes.contains(VertexAttributes::NORMAL), &mesh.normals),
            indices: Cow::Borrowed(&mesh.indices[..]),
            texture,
            paint: self.paint(),
            matrices: self.matrix_uniforms(),
        };
        self.submit(DrawCmd::Geometry(cmd));
    }

    fn bound_texture(&self) -> Option<TextureSource> {
        self.bindings
            .current(BindingKind::Texture { slot: 0 })
            .map(|scope| TextureSource::Bound { texture: scope.resource })
    }

    // ── primitives and nodes ──────────────────────────────────────────────

    pub fn draw_primitive(&mut self, primitive: &Primitive, mode: RenderMode) -> Result<()> {
        self.matrices.push(MatrixMode::ModelView);
        self.matrices.mult(MatrixMode::ModelView, primitive.node.global_transform());
        self.draw_mesh(&primitive.mesh, mode);
        self.matrices.pop(MatrixMode::ModelView)
    }

    /// Draws the node's gizmo (a small box and its axes) in its frame.
    pub fn draw_node(&mut self, node: &Node) -> Result<()> {
        self.matrices.push(MatrixMode::ModelView);
        self.matrices.mult(MatrixMode::ModelView, node.global_transform());
        self.draw_box(Vec3::ZERO, Vec3::splat(10.0))?;
        self.draw_axis(20.0);
        self.matrices.pop(MatrixMode::ModelView)
    }

    // ── images and video ──────────────────────────────────────────────────

    fn quad(&self, dest: Rect, z: f32, uv: Rect, texture: TextureSource) -> GeometryCmd<'static> {
        let Rect { origin: p, size: s } = dest;
        let positions = vec![
            Vec3::new(p.x, p.y, z),
            Vec3::new(p.x + s.x, p.y, z),
            Vec3::new(p.x + s.x, p.y + s.y, z),
            Vec3::new(p.x, p.y + s.y, z),
        ];
        let (t0, t1) = (uv.origin, uv.origin + uv.size);
        let tex_coords = vec![
            Vec2::new(t0.x, t0.y),
            Vec2::new(t1.x, t0.y),
            Vec2::new(t1.x, t1.y),
            Vec2::new(t0.x, t1.y),
        ];
        GeometryCmd {
            topology: PrimitiveMode::Triangles,
            render_mode: RenderMode::Fill,
            attributes: VertexAttributes::POSITION | VertexAttributes::TEX_COORD,
            positions: Cow::Owned(positions),
            colors: Cow::Borrowed(&[]),
            tex_coords: Cow::Owned(tex_coords),
            normals: Cow::Borrowed(&[]),
            indices: Cow::Borrowed(&QUAD_INDICES[..]),
            texture: Some(texture),
            paint: self.paint(),
            matrices: self.matrix_uniforms(),
        }
    }

    /// Draws the whole image at `(x, y)` at its own size, minus the anchor.
    pub fn draw_image(&mut self, image: ImageRef<'_>, x: f32, y: f32) {
        let size = image.size();
        self.draw_image_sized(image, x, y, size.x, size.y);
    }

    /// Draws the whole image stretched to `w × h`, minus the anchor.
    pub fn draw_image_sized(&mut self, image: ImageRef<'_>, x: f32, y: f32, w: f32, h: f32) {
        let offset = image.anchor().offset(Vec2::new(w, h));
        let dest = Rect::new(x - offset.x, y - offset.y, w, h);
        let source = Rect::from_origin_size(Vec2::ZERO, image.size());
        self.draw_image_subsection(image, dest, 0.0, source);
    }

    /// Draws the `source` texel region into `dest`. No aspect correction and
    /// no anchor are applied.
    pub fn draw_image_subsection(&mut self, image: ImageRef<'_>, dest: Rect, z: f32, source: Rect) {
        if !image.is_allocated() {
            log::debug!("skipping draw of unallocated image {:?}", image.id());
            return;
        }
        let size = image.size();
        let uv = Rect::from_origin_size(source.origin / size, source.size / size);
        let texture = TextureSource::Image {
            image: image.id(),
            channel_width: image.channel_width(),
        };
        let cmd = self.quad(dest, z, uv, texture);
        self.submit(DrawCmd::Geometry(cmd));
    }

    /// Draws the current frame into `dest`. A source that is uninitialized
    /// or lacks the planes its pixel format needs is skipped.
    pub fn draw_video(&mut self, video: &dyn VideoSource, dest: Rect) {
        if !video.is_initialized() {
            log::debug!("skipping draw of uninitialized video {:?}", video.id());
            return;
        }
        let format = video.pixel_format();
        let planes = video.planes();
        if planes.len() != format.plane_count() {
            log::debug!(
                "skipping draw of video {:?}: {} planes, {format:?} needs {}",
                video.id(),
                planes.len(),
                format.plane_count()
            );
            return;
        }
        let texture = TextureSource::Video {
            video: video.id(),
            format,
            fresh: video.is_frame_new(),
        };
        let cmd = self.quad(dest, 0.0, Rect::new(0.0, 0.0, 1.0, 1.0), texture);
        self.submit(DrawCmd::Geometry(cmd));
    }

    pub fn draw_video_at(&mut self, video: &dyn VideoSource, x: f32, y: f32) {
        let dest = Rect::from_origin_size(Vec2::new(x, y), video.size());
        self.draw_video(video, dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Image, MeshFeatures, Stroke};
    use crate::paint::Color;
    use crate::render::RendererConfig;
    use crate::scene::DrawList;

    fn renderer() -> Renderer<DrawList> {
        Renderer::new(DrawList::new(), RendererConfig::default())
    }

    fn colored_triangle() -> Mesh {
        let mut m = Mesh::from_vertices(PrimitiveMode::Triangles, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        m.colors = vec![Color::WHITE; 3];
        m.normals = vec![Vec3::Z; 3];
        m
    }

    // ── meshes ────────────────────────────────────────────────────────────

    #[test]
    fn attributes_need_flag_and_data() {
        let m = Mesh::from_vertices(PrimitiveMode::Points, vec![Vec3::ZERO]);
        assert_eq!(mesh_attributes(&m, true, true, true), VertexAttributes::POSITION);

        let m = colored_triangle();
        assert_eq!(
            mesh_attributes(&m, true, true, false),
            VertexAttributes::POSITION | VertexAttributes::COLOR
        );
    }

    #[test]
    fn disabled_attributes_are_not_streamed() {
        let mut r = renderer();
        r.draw_mesh_with(&colored_triangle(), RenderMode::Fill, false, false, true);
        let g = r.backend().geometry().next().unwrap();
        assert!(g.colors.is_empty());
        assert_eq!(g.normals.len(), 3);
    }

    #[test]
    fn wireframe_reuses_fill_data() {
        let mesh = colored_triangle();
        let mut r = renderer();
        r.draw_mesh(&mesh, RenderMode::Fill);
        r.draw_mesh(&mesh, RenderMode::Wireframe);
        let cmds: Vec<_> = r.backend().geometry().collect();
        assert_eq!(cmds[0].topology, cmds[1].topology);
        assert_eq!(cmds[0].positions, cmds[1].positions);
        assert_eq!(cmds[1].render_mode, RenderMode::Wireframe);
    }

    #[test]
    fn drawable_mesh_without_features_uses_mesh_flags() {
        let mut mesh = colored_triangle();
        mesh.enable_colors(false);
        let mut r = renderer();
        r.draw(Drawable::Mesh {
            mesh: &mesh,
            mode: RenderMode::Fill,
            features: None,
        })
        .unwrap();
        r.draw(Drawable::Mesh {
            mesh: &mesh,
            mode: RenderMode::Fill,
            features: Some(MeshFeatures::ALL),
        })
        .unwrap();
        let cmds: Vec<_> = r.backend().geometry().collect();
        assert!(!cmds[0].attributes.contains(VertexAttributes::COLOR));
        assert!(cmds[1].attributes.contains(VertexAttributes::COLOR));
    }

    #[test]
    fn textured_mesh_samples_slot_zero() {
        use crate::binding::Texture;

        struct Tex(crate::binding::ResourceId);
        impl Texture for Tex {
            fn id(&self) -> crate::binding::ResourceId {
                self.0
            }
            fn size(&self) -> Vec2 {
                Vec2::ONE
            }
        }

        let mut mesh = colored_triangle();
        mesh.tex_coords = vec![Vec2::ZERO; 3];
        let tex = Tex(crate::binding::ResourceId::next());

        let mut r = renderer();
        r.bind_texture(&tex, 0).unwrap();
        r.draw_mesh(&mesh, RenderMode::Fill);
        let g = r.backend().geometry().next().unwrap();
        assert_eq!(g.texture, Some(TextureSource::Bound { texture: tex.0 }));
    }

    // ── paths ─────────────────────────────────────────────────────────────

    #[test]
    fn path_at_offsets_through_model_view_only() {
        let mut path = Path::new();
        path.rectangle(0.0, 0.0, 10.0, 10.0);
        let original = path.clone();

        let mut r = renderer();
        r.draw_path_at(&path, 5.0, 7.0).unwrap();

        assert_eq!(path, original);
        let poly = r.backend().items()[0].cmd.as_polygon().unwrap();
        let moved = poly.matrices.model_view.transform_point3(Vec3::ZERO);
        assert_eq!(moved, Vec3::new(5.0, 7.0, 0.0));
        assert_eq!(poly.contours[0].points[0], Vec3::ZERO);
        assert_eq!(r.current_matrix(MatrixMode::ModelView), glam::Mat4::IDENTITY);
    }

    #[test]
    fn path_uses_its_own_colors() {
        let mut path = Path::new();
        path.rectangle(0.0, 0.0, 1.0, 1.0);
        path.fill = Some(Color::BLACK);
        path.stroke = Some(Stroke {
            color: Color::from_rgb8(255, 0, 0),
            width: 3.0,
        });

        let mut r = renderer();
        r.draw_path(&path);
        let items = r.backend().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].cmd.as_polygon().unwrap().paint.color, Color::BLACK);
        let stroke = items[1].cmd.as_geometry().unwrap();
        assert_eq!(stroke.topology, PrimitiveMode::LineLoop);
        assert_eq!(stroke.paint.line_width, 3.0);
        assert_eq!(r.style().line_width, 1.0);
    }

    #[test]
    fn short_polyline_draws_nothing() {
        let mut r = renderer();
        r.draw_polyline(&Polyline::new(vec![Vec3::ZERO], false));
        assert!(r.backend().items().is_empty());
    }

    // ── images ────────────────────────────────────────────────────────────

    #[test]
    fn subsection_maps_source_to_unit_uvs_without_aspect_fix() {
        let img: Image<u8> = Image::new(200, 100, 4);
        let mut r = renderer();
        r.draw_image_subsection(
            (&img).into(),
            Rect::new(0.0, 0.0, 300.0, 300.0),
            0.0,
            Rect::new(50.0, 50.0, 100.0, 50.0),
        );
        let g = r.backend().geometry().next().unwrap();
        assert_eq!(g.tex_coords[0], Vec2::new(0.25, 0.5));
        assert_eq!(g.tex_coords[2], Vec2::new(0.75, 1.0));
        assert_eq!(g.positions[2], Vec3::new(300.0, 300.0, 0.0));
    }

    #[test]
    fn drawable_image_form_ignores_anchor() {
        let mut img: Image<f32> = Image::new(10, 10, 1);
        img.set_anchor_percent(0.5, 0.5);
        let mut r = renderer();
        r.draw(Drawable::Image {
            image: (&img).into(),
            dest: Rect::new(0.0, 0.0, 10.0, 10.0),
            z: 1.0,
            source: Rect::new(0.0, 0.0, 10.0, 10.0),
        })
        .unwrap();
        let g = r.backend().geometry().next().unwrap();
        assert_eq!(g.positions[0], Vec3::new(0.0, 0.0, 1.0));
    }

    // ── video ─────────────────────────────────────────────────────────────

    struct StubVideo {
        id: crate::binding::ResourceId,
        ready: bool,
        planes: Vec<crate::paint::Pixels<u8>>,
    }

    impl VideoSource for StubVideo {
        fn id(&self) -> crate::binding::ResourceId {
            self.id
        }
        fn size(&self) -> Vec2 {
            Vec2::new(64.0, 48.0)
        }
        fn pixel_format(&self) -> crate::draw::PixelFormat {
            crate::draw::PixelFormat::Rgba
        }
        fn is_initialized(&self) -> bool {
            self.ready
        }
        fn is_frame_new(&self) -> bool {
            self.ready
        }
        fn planes(&self) -> &[crate::paint::Pixels<u8>] {
            &self.planes
        }
    }

    #[test]
    fn uninitialized_video_is_a_no_op() {
        let video = StubVideo {
            id: crate::binding::ResourceId::next(),
            ready: false,
            planes: Vec::new(),
        };
        let mut r = renderer();
        r.draw_video_at(&video, 0.0, 0.0);
        assert!(r.backend().items().is_empty());
    }

    #[test]
    fn ready_video_draws_a_textured_quad() {
        let video = StubVideo {
            id: crate::binding::ResourceId::next(),
            ready: true,
            planes: vec![crate::paint::Pixels::new(64, 48, 4)],
        };
        let mut r = renderer();
        r.draw(Drawable::Video {
            video: &video,
            dest: Rect::new(0.0, 0.0, 64.0, 48.0),
        })
        .unwrap();
        let g = r.backend().geometry().next().unwrap();
        assert!(matches!(g.texture, Some(TextureSource::Video { fresh: true, .. })));
        assert_eq!(&*g.indices, &QUAD_INDICES);
    }

    #[test]
    fn initialized_video_without_planes_is_a_no_op() {
        let video = StubVideo {
            id: crate::binding::ResourceId::next(),
            ready: true,
            planes: Vec::new(),
        };
        let mut r = renderer();
        r.draw_video(&video, Rect::new(0.0, 0.0, 64.0, 48.0));
        assert!(r.backend().items().is_empty());
    }
}
