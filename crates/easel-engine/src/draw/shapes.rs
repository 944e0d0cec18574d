//! Vertex generation for the immediate-mode 2D shapes.

use glam::Vec3;

use crate::style::RectMode;

/// Corners of a rectangle in draw order, honoring the rect mode.
pub(crate) fn rectangle_corners(x: f32, y: f32, z: f32, w: f32, h: f32, mode: RectMode) -> [Vec3; 4] {
    let (x0, y0) = match mode {
        RectMode::Corner => (x, y),
        RectMode::Center => (x - w * 0.5, y - h * 0.5),
    };
    [
        Vec3::new(x0, y0, z),
        Vec3::new(x0 + w, y0, z),
        Vec3::new(x0 + w, y0 + h, z),
        Vec3::new(x0, y0 + h, z),
    ]
}

/// Points around an ellipse centered on `center` with the given radii.
///
/// Returns `resolution` points; the closing edge is implied.
pub(crate) fn ellipse_points(center: Vec3, rx: f32, ry: f32, resolution: u32) -> Vec<Vec3> {
    let n = resolution.max(3);
    (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * std::f32::consts::TAU;
            center + Vec3::new(a.cos() * rx, a.sin() * ry, 0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_mode_offsets_by_half_size() {
        let c = rectangle_corners(10.0, 10.0, 0.0, 4.0, 2.0, RectMode::Center);
        assert_eq!(c[0], Vec3::new(8.0, 9.0, 0.0));
        assert_eq!(c[2], Vec3::new(12.0, 11.0, 0.0));
    }

    #[test]
    fn ellipse_has_resolution_points_on_the_outline() {
        let pts = ellipse_points(Vec3::ZERO, 5.0, 5.0, 12);
        assert_eq!(pts.len(), 12);
        assert!(pts.iter().all(|p| (p.length() - 5.0).abs() < 1e-4));
    }
}
