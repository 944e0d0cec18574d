use glam::{Mat4, Vec2, Vec3};

use crate::transform::Handedness;

/// Default vertical field of view for screen perspective, in degrees.
pub const DEFAULT_FOV: f32 = 60.0;

/// Projection and view matrices for a screen-aligned camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenSetup {
    pub projection: Mat4,
    pub view: Mat4,
    /// Eye distance from the z = 0 plane (zero for orthographic setups).
    pub eye_distance: f32,
}

/// Resolves a requested dimension: `<= 0` means "use the viewport's".
#[inline]
fn resolve_size(width: f32, height: f32, viewport: Vec2) -> Vec2 {
    Vec2::new(
        if width > 0.0 { width } else { viewport.x },
        if height > 0.0 { height } else { viewport.y },
    )
}

#[inline]
fn depth_flip(handedness: Handedness) -> Mat4 {
    Mat4::from_scale(Vec3::new(1.0, 1.0, handedness.depth_sign()))
}

/// Perspective camera looking at the z = 0 plane so that one world unit maps
/// to one pixel there.
///
/// The eye sits at `(w/2, h/2, d)` with `d = (h/2) / tan(fov/2)`. A near or
/// far distance of `0` defaults to `d/10` and `d*10`.
pub fn screen_perspective(
    viewport: Vec2,
    width: f32,
    height: f32,
    fov_degrees: f32,
    near: f32,
    far: f32,
    handedness: Handedness,
) -> ScreenSetup {
    let size = resolve_size(width, height, viewport);
    let eye_x = size.x * 0.5;
    let eye_y = size.y * 0.5;
    let half_fov = (fov_degrees * 0.5).to_radians();
    let dist = eye_y / half_fov.tan();
    let aspect = size.x / size.y;

    let near = if near == 0.0 { dist / 10.0 } else { near };
    let far = if far == 0.0 { dist * 10.0 } else { far };

    let projection =
        Mat4::perspective_rh_gl(fov_degrees.to_radians(), aspect, near, far) * depth_flip(handedness);

    // Left-handed: the eye looks down +Z from the negative side.
    let eye_z = dist * handedness.depth_sign();
    let eye = Vec3::new(eye_x, eye_y, eye_z);
    let center = Vec3::new(eye_x, eye_y, 0.0);
    let view = match handedness {
        Handedness::Right => Mat4::look_at_rh(eye, center, Vec3::Y),
        Handedness::Left => Mat4::look_at_lh(eye, center, Vec3::Y),
    };

    ScreenSetup {
        projection,
        view,
        eye_distance: dist,
    }
}

/// Orthographic projection spanning `[0, w] × [0, h]` with an identity view.
pub fn screen_ortho(
    viewport: Vec2,
    width: f32,
    height: f32,
    near: f32,
    far: f32,
    handedness: Handedness,
) -> ScreenSetup {
    let size = resolve_size(width, height, viewport);
    let projection =
        Mat4::orthographic_rh_gl(0.0, size.x, 0.0, size.y, near, far) * depth_flip(handedness);
    ScreenSetup {
        projection,
        view: Mat4::IDENTITY,
        eye_distance: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const EPS: f32 = 1e-3;

    fn to_ndc(setup: &ScreenSetup, p: Vec3) -> Vec3 {
        let clip = setup.projection * setup.view * Vec4::new(p.x, p.y, p.z, 1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn perspective_eye_distance_uses_half_tangent() {
        let s = screen_perspective(VIEWPORT, 0.0, 0.0, 60.0, 0.0, 0.0, Handedness::Right);
        let expected = 300.0 / 30f32.to_radians().tan();
        assert!((s.eye_distance - expected).abs() < EPS);
    }

    #[test]
    fn perspective_maps_screen_plane_to_ndc_corners() {
        for handedness in [Handedness::Right, Handedness::Left] {
            let s = screen_perspective(VIEWPORT, -1.0, -1.0, DEFAULT_FOV, 0.0, 0.0, handedness);
            let origin = to_ndc(&s, Vec3::ZERO);
            let corner = to_ndc(&s, Vec3::new(800.0, 600.0, 0.0));
            assert!((origin.x + 1.0).abs() < EPS && (origin.y + 1.0).abs() < EPS, "{handedness:?}");
            assert!((corner.x - 1.0).abs() < EPS && (corner.y - 1.0).abs() < EPS, "{handedness:?}");
            assert!(origin.z.abs() < 1.0, "z = 0 plane must be inside the depth range");
        }
    }

    #[test]
    fn explicit_size_overrides_viewport() {
        let s = screen_perspective(VIEWPORT, 200.0, 100.0, DEFAULT_FOV, 0.0, 0.0, Handedness::Right);
        let corner = to_ndc(&s, Vec3::new(200.0, 100.0, 0.0));
        assert!((corner.x - 1.0).abs() < EPS && (corner.y - 1.0).abs() < EPS);
    }

    #[test]
    fn ortho_spans_viewport() {
        let s = screen_ortho(VIEWPORT, 0.0, 0.0, -1.0, 1.0, Handedness::Right);
        let corner = to_ndc(&s, Vec3::new(800.0, 600.0, 0.0));
        assert!(corner.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), EPS));
        assert_eq!(s.view, Mat4::IDENTITY);
    }
}
