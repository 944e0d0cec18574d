/// Coordinate handedness.
///
/// Right-handed: +X right, +Y up, -Z forward, positive rotation is
/// counter-clockwise about the axis. Left-handed flips the depth axis and the
/// rotation direction. Every rotation and projection in the engine goes
/// through these two signs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl Handedness {
    #[inline]
    pub const fn rotation_sign(self) -> f32 {
        match self {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        }
    }

    /// Sign applied to the z row of projection matrices.
    #[inline]
    pub const fn depth_sign(self) -> f32 {
        self.rotation_sign()
    }

    /// Converts a user-facing angle in degrees to radians for composition.
    #[inline]
    pub fn signed_radians(self, degrees: f32) -> f32 {
        degrees.to_radians() * self.rotation_sign()
    }
}
