use anyhow::{Context, Result};
use easel_engine::binding::{OffscreenTarget, ScreenCamera};
use easel_engine::coords::Rect;
use easel_engine::draw::{Drawable, Image, Mesh, Path, PrimitiveMode, RenderMode, Stroke};
use easel_engine::glam::{Vec2, Vec3};
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::paint::Color;
use easel_engine::scene::{DrawCmd, DrawList};
use easel_engine::style::FillMode;
use easel_engine::view::Orientation;
use easel_engine::{Renderer, RendererConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║            EASEL STUDIO v0.1           ║");
    println!("  ║   headless session  ·  recording list  ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let mut renderer = Renderer::new(DrawList::new(), RendererConfig::default());
    run_frame(&mut renderer).context("frame failed")?;
    report(renderer.backend());

    // Same frame on a portrait device.
    renderer.set_orientation(Orientation::Cw90, true);
    run_frame(&mut renderer).context("rotated frame failed")?;
    report(renderer.backend());

    Ok(())
}

fn run_frame(r: &mut Renderer<DrawList>) -> easel_engine::Result<()> {
    r.start_render();

    // ── 2D ────────────────────────────────────────────────────────────────
    r.push_style();
    r.set_color(Color::from_hex(0xff8800));
    r.draw_rectangle(20.0, 20.0, 0.0, 200.0, 120.0);
    r.set_fill_mode(FillMode::Outline);
    r.set_line_width(2.0);
    r.draw_circle(Vec3::new(320.0, 80.0, 0.0), 60.0);
    r.pop_style()?;

    let mut path = Path::new();
    path.move_to(Vec3::new(0.0, 0.0, 0.0))
        .bezier_to(Vec3::new(40.0, -60.0, 0.0), Vec3::new(120.0, 60.0, 0.0), Vec3::new(160.0, 0.0, 0.0))
        .close();
    path.stroke = Some(Stroke {
        color: Color::WHITE,
        width: 1.5,
    });
    r.draw(Drawable::Path {
        path: &path,
        offset: Some(Vec2::new(420.0, 80.0)),
    })?;

    let mut sprite: Image<u8> = Image::new(64, 64, 4);
    sprite.pixels_mut().fill(Color::from_rgb8(40, 200, 120));
    sprite.set_anchor_percent(0.5, 0.5);
    r.draw_image((&sprite).into(), 600.0, 80.0);

    // ── off-screen pass ───────────────────────────────────────────────────
    let target = OffscreenTarget::new(256.0, 256.0);
    r.begin(&target, true)?;
    r.background_gray(0);
    let mut strip = Mesh::new(PrimitiveMode::TriangleStrip);
    for (x, y) in [(0.0, 0.0), (0.0, 256.0), (256.0, 0.0), (256.0, 256.0)] {
        strip.add_vertex(Vec3::new(x, y, 0.0));
    }
    r.draw_mesh(&strip, RenderMode::Fill);
    r.end(&target)?;

    // ── 3D ────────────────────────────────────────────────────────────────
    let camera = ScreenCamera::new().looking_at(Vec3::new(0.0, 200.0, 600.0), Vec3::ZERO);
    r.push_view();
    r.bind_camera(&camera, Rect::new(0.0, 0.0, 0.0, 0.0));
    r.draw_sphere(Vec3::ZERO, 80.0)?;
    r.draw_box(Vec3::new(200.0, 0.0, 0.0), Vec3::splat(60.0))?;
    r.draw_axis(100.0);
    r.unbind_camera(&camera)?;
    r.pop_view()?;

    r.finish_render();
    Ok(())
}

fn report(list: &DrawList) {
    let (mut clears, mut geometry, mut polygons, mut vertices) = (0, 0, 0, 0);
    for item in list.items() {
        match &item.cmd {
            DrawCmd::Clear(_) => clears += 1,
            DrawCmd::Geometry(g) => {
                geometry += 1;
                vertices += g.positions.len();
            }
            DrawCmd::Polygon(_) => polygons += 1,
        }
    }
    log::info!(
        "frame {}: {clears} clears, {geometry} geometry ({vertices} vertices), {polygons} polygons, {} binding events",
        list.frames(),
        list.events().len()
    );
    if let Some(vp) = list.viewport() {
        log::info!("native viewport {}x{} at ({}, {})", vp.width(), vp.height(), vp.x(), vp.y());
    }
}
