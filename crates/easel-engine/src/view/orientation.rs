use glam::{Mat4, Vec2, Vec3};

use crate::coords::Rect;
use crate::transform::Handedness;

/// Rotation of the logical surface relative to the native one.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Orientation {
    #[default]
    Default,
    Rotate180,
    /// 90° clockwise.
    Cw90,
    /// 90° counter-clockwise.
    Ccw90,
}

impl Orientation {
    /// Clockwise rotation in degrees.
    #[inline]
    pub const fn clockwise_degrees(self) -> f32 {
        match self {
            Orientation::Default => 0.0,
            Orientation::Cw90 => 90.0,
            Orientation::Rotate180 => 180.0,
            Orientation::Ccw90 => 270.0,
        }
    }

    #[inline]
    pub const fn is_quarter_turn(self) -> bool {
        matches!(self, Orientation::Cw90 | Orientation::Ccw90)
    }

    /// The orientation that undoes this one.
    #[inline]
    pub const fn inverse(self) -> Self {
        match self {
            Orientation::Cw90 => Orientation::Ccw90,
            Orientation::Ccw90 => Orientation::Cw90,
            other => other,
        }
    }

    /// Size of a surface of `size` after rotation.
    #[inline]
    pub fn oriented_size(self, size: Vec2) -> Vec2 {
        if self.is_quarter_turn() {
            Vec2::new(size.y, size.x)
        } else {
            size
        }
    }

    /// Maps `rect`, expressed inside a surface of `surface` size, into the
    /// rotated surface.
    pub fn apply_to_rect(self, rect: Rect, surface: Vec2) -> Rect {
        let Rect { origin: o, size: s } = rect;
        match self {
            Orientation::Default => rect,
            Orientation::Rotate180 => Rect::new(surface.x - o.x - s.x, surface.y - o.y - s.y, s.x, s.y),
            Orientation::Cw90 => Rect::new(surface.y - o.y - s.y, o.x, s.y, s.x),
            Orientation::Ccw90 => Rect::new(o.y, surface.x - o.x - s.x, s.y, s.x),
        }
    }

    /// Clip-space matrix applying the rotation and, when `v_flip` is set, the
    /// vertical flip (flip first, then rotate).
    pub fn matrix(self, v_flip: bool, handedness: Handedness) -> Mat4 {
        let rotation = if self == Orientation::Default {
            Mat4::IDENTITY
        } else {
            Mat4::from_rotation_z(handedness.signed_radians(-self.clockwise_degrees()))
        };
        let flip = if v_flip {
            Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
        } else {
            Mat4::IDENTITY
        };
        rotation * flip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn quarter_turns_swap_size() {
        assert_eq!(Orientation::Cw90.oriented_size(SURFACE), Vec2::new(600.0, 800.0));
        assert_eq!(Orientation::Rotate180.oriented_size(SURFACE), SURFACE);
    }

    #[test]
    fn cw_then_ccw_restores_rect() {
        let rect = Rect::new(10.0, 20.0, 300.0, 100.0);
        let rotated = Orientation::Cw90.apply_to_rect(rect, SURFACE);
        let back = Orientation::Ccw90.apply_to_rect(rotated, Orientation::Cw90.oriented_size(SURFACE));
        assert_eq!(back, rect);
    }

    #[test]
    fn rotate_180_is_its_own_inverse() {
        let rect = Rect::new(10.0, 20.0, 300.0, 100.0);
        let once = Orientation::Rotate180.apply_to_rect(rect, SURFACE);
        assert_eq!(once, Rect::new(490.0, 480.0, 300.0, 100.0));
        assert_eq!(Orientation::Rotate180.apply_to_rect(once, SURFACE), rect);
    }

    #[test]
    fn full_surface_maps_to_full_rotated_surface() {
        let full = Rect::from_origin_size(Vec2::ZERO, SURFACE);
        let rotated = Orientation::Ccw90.apply_to_rect(full, SURFACE);
        assert_eq!(rotated, Rect::new(0.0, 0.0, 600.0, 800.0));
    }

    #[test]
    fn default_without_flip_is_identity() {
        assert_eq!(Orientation::Default.matrix(false, Handedness::Right), Mat4::IDENTITY);
    }

    #[test]
    fn flip_negates_y() {
        let m = Orientation::Default.matrix(true, Handedness::Right);
        assert_eq!(m.transform_point3(Vec3::Y), -Vec3::Y);
    }

    #[test]
    fn cw90_turns_up_into_right() {
        let m = Orientation::Cw90.matrix(false, Handedness::Right);
        let p = m.transform_point3(Vec3::Y);
        assert!(p.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn handedness_mirrors_rotation() {
        let right = Orientation::Cw90.matrix(false, Handedness::Right).transform_point3(Vec3::Y);
        let left = Orientation::Cw90.matrix(false, Handedness::Left).transform_point3(Vec3::Y);
        assert!(right.abs_diff_eq(-left, 1e-6));
    }
}
