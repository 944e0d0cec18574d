use glam::{Mat4, Quat, Vec3};

use crate::coords::Rect;

use super::{Camera, ResourceId};

/// Free camera with a position/rotation and a perspective or orthographic lens.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenCamera {
    id: ResourceId,
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub ortho: bool,
    pub v_flipped: bool,
}

impl Default for ScreenCamera {
    fn default() -> Self {
        Self {
            id: ResourceId::next(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov: 60.0,
            near: 1.0,
            far: 10_000.0,
            ortho: false,
            v_flipped: false,
        }
    }
}

impl ScreenCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn looking_at(mut self, eye: Vec3, target: Vec3) -> Self {
        self.position = eye;
        // look_at_rh yields world-to-camera; the camera's own rotation is its inverse.
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        self.rotation = Quat::from_mat4(&view.inverse());
        self
    }
}

impl Camera for ScreenCamera {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn global_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    fn projection_matrix(&self, viewport: Rect) -> Mat4 {
        let w = viewport.size.x.max(1.0);
        let h = viewport.size.y.max(1.0);
        if self.ortho {
            Mat4::orthographic_rh_gl(-w * 0.5, w * 0.5, -h * 0.5, h * 0.5, self.near, self.far)
        } else {
            Mat4::perspective_rh_gl(self.fov.to_radians(), w / h, self.near, self.far)
        }
    }

    fn is_v_flipped(&self) -> bool {
        self.v_flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_inverts_placement() {
        let cam = ScreenCamera::new().looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!(in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-4));
    }

    #[test]
    fn ortho_projection_spans_viewport() {
        let cam = ScreenCamera { ortho: true, ..ScreenCamera::new() };
        let p = cam.projection_matrix(Rect::new(0.0, 0.0, 200.0, 100.0));
        let edge = p.project_point3(Vec3::new(100.0, 50.0, -5.0));
        assert!((edge.x - 1.0).abs() < 1e-5 && (edge.y - 1.0).abs() < 1e-5);
    }
}
