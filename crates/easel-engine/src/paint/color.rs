/// Straight-alpha RGBA color with components in `[0, 1]`.
///
/// This is the single internal representation used by the style stack, draw
/// commands and clears.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from unit-range float components, clamping each one.
    #[inline]
    pub fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            a.clamp(0.0, 1.0),
        )
    }

    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(unit(r), unit(g), unit(b), unit(a))
    }

    /// Opaque gray from a single byte brightness.
    #[inline]
    pub fn gray8(brightness: u8) -> Self {
        Self::from_rgb8(brightness, brightness, brightness)
    }

    /// Opaque color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Replaces alpha with a byte value, keeping RGB.
    #[inline]
    pub fn with_alpha8(self, a: u8) -> Self {
        Self { a: unit(a), ..self }
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// Quantizes back to straight-alpha bytes.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[inline]
fn unit(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(Color::from_hex(0xff8000).to_rgba8(), [255, 128, 0, 255]);
    }

    #[test]
    fn hex_ignores_high_bits() {
        assert_eq!(Color::from_hex(0xab_00ff00), Color::from_hex(0x00ff00));
    }

    #[test]
    fn gray_is_uniform_and_opaque() {
        let c = Color::gray8(51);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
        assert!(c.is_opaque());
    }

    #[test]
    fn alpha_override_keeps_rgb() {
        let c = Color::from_rgb8(10, 20, 30).with_alpha8(0);
        assert_eq!(c.to_rgba8(), [10, 20, 30, 0]);
    }

    #[test]
    fn byte_forms_agree_with_unit_form() {
        assert_eq!(Color::from_rgba8(255, 0, 255, 255), Color::from_unit(1.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn from_unit_clamps() {
        assert_eq!(Color::from_unit(2.0, -1.0, 0.5, 1.5), Color::new(1.0, 0.0, 0.5, 1.0));
    }
}
