use glam::Vec3;

use crate::paint::Color;
use crate::style::PolyWindingMode;

/// An open or closed sequence of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
    pub closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Vec3>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn add_vertex(&mut self, p: Vec3) {
        self.points.push(p);
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    /// Starts a new contour.
    MoveTo(Vec3),
    LineTo(Vec3),
    /// Quadratic curve: control point, end point.
    QuadBezierTo(Vec3, Vec3),
    /// Cubic curve: two control points, end point.
    BezierTo(Vec3, Vec3, Vec3),
    /// Closes the current contour.
    Close,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Vector shape built from commands, with its own fill and stroke.
///
/// Drawing a path never touches the renderer's current style.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub winding: PolyWindingMode,
    /// Segments per curve; `None` uses the renderer's curve resolution.
    pub curve_resolution: Option<u32>,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            fill: Some(Color::WHITE),
            stroke: None,
            winding: PolyWindingMode::Odd,
            curve_resolution: None,
        }
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn move_to(&mut self, p: Vec3) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Vec3) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn quad_bezier_to(&mut self, ctrl: Vec3, to: Vec3) -> &mut Self {
        self.commands.push(PathCommand::QuadBezierTo(ctrl, to));
        self
    }

    pub fn bezier_to(&mut self, c1: Vec3, c2: Vec3, to: Vec3) -> &mut Self {
        self.commands.push(PathCommand::BezierTo(c1, c2, to));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Axis-aligned rectangle contour.
    pub fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.move_to(Vec3::new(x, y, 0.0))
            .line_to(Vec3::new(x + w, y, 0.0))
            .line_to(Vec3::new(x + w, y + h, 0.0))
            .line_to(Vec3::new(x, y + h, 0.0))
            .close()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Flattens the commands into one polyline per contour.
    ///
    /// Each curve span becomes `resolution` straight segments. Contours with
    /// fewer than two points are dropped.
    pub fn outlines(&self, resolution: u32) -> Vec<Polyline> {
        let segments = resolution.max(1);
        let mut out = Vec::new();
        let mut current = Polyline::default();

        let flush = |line: &mut Polyline, out: &mut Vec<Polyline>| {
            if line.len() >= 2 {
                out.push(std::mem::take(line));
            } else {
                line.points.clear();
                line.closed = false;
            }
        };

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    flush(&mut current, &mut out);
                    current.add_vertex(p);
                }
                PathCommand::LineTo(p) => current.add_vertex(p),
                PathCommand::QuadBezierTo(ctrl, to) => {
                    let from = last_or(&current, ctrl);
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        current.add_vertex(quad_point(from, ctrl, to, t));
                    }
                }
                PathCommand::BezierTo(c1, c2, to) => {
                    let from = last_or(&current, c1);
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        current.add_vertex(cubic_point(from, c1, c2, to, t));
                    }
                }
                PathCommand::Close => {
                    current.close();
                    flush(&mut current, &mut out);
                }
            }
        }
        flush(&mut current, &mut out);
        out
    }
}

#[inline]
fn last_or(line: &Polyline, fallback: Vec3) -> Vec3 {
    line.points.last().copied().unwrap_or(fallback)
}

fn quad_point(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn cubic_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
