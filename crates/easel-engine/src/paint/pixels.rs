use bytemuck::Pod;

use super::Color;

/// Width of one pixel channel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ChannelWidth {
    U8,
    U16,
    F32,
}

impl ChannelWidth {
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            ChannelWidth::U8 => 1,
            ChannelWidth::U16 => 2,
            ChannelWidth::F32 => 4,
        }
    }
}

/// Scalar type stored in a [`Pixels`] buffer.
pub trait PixelComponent: Pod + Default + 'static {
    const WIDTH: ChannelWidth;

    fn to_unit(self) -> f32;

    fn from_unit(v: f32) -> Self;
}

impl PixelComponent for u8 {
    const WIDTH: ChannelWidth = ChannelWidth::U8;

    #[inline]
    fn to_unit(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_unit(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl PixelComponent for u16 {
    const WIDTH: ChannelWidth = ChannelWidth::U16;

    #[inline]
    fn to_unit(self) -> f32 {
        self as f32 / 65535.0
    }

    #[inline]
    fn from_unit(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 65535.0).round() as u16
    }
}

impl PixelComponent for f32 {
    const WIDTH: ChannelWidth = ChannelWidth::F32;

    #[inline]
    fn to_unit(self) -> f32 {
        self
    }

    #[inline]
    fn from_unit(v: f32) -> Self {
        v
    }
}

/// Row-major, tightly packed pixel buffer.
///
/// Channel count is 1 (gray), 3 (RGB) or 4 (RGBA). Rows run top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pixels<T: PixelComponent> {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<T>,
}

impl<T: PixelComponent> Pixels<T> {
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        let mut pixels = Self::default();
        pixels.allocate(width, height, channels);
        pixels
    }

    /// Resizes to the given dimensions; contents are reset to zero.
    pub fn allocate(&mut self, width: u32, height: u32, channels: u32) {
        debug_assert!(matches!(channels, 1 | 3 | 4), "unsupported channel count {channels}");
        self.width = width;
        self.height = height;
        self.channels = channels;
        self.data.clear();
        self.data
            .resize(width as usize * height as usize * channels as usize, T::default());
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[inline]
    pub fn channel_width(&self) -> ChannelWidth {
        T::WIDTH
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Raw bytes, e.g. for texture uploads.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels as usize)
    }

    /// Reads one pixel; gray and RGB expand to opaque RGBA.
    pub fn color(&self, x: u32, y: u32) -> Option<Color> {
        let i = self.offset(x, y)?;
        let px = &self.data[i..i + self.channels as usize];
        Some(match px {
            [v] => {
                let v = v.to_unit();
                Color::new(v, v, v, 1.0)
            }
            [r, g, b] => Color::new(r.to_unit(), g.to_unit(), b.to_unit(), 1.0),
            [r, g, b, a] => Color::new(r.to_unit(), g.to_unit(), b.to_unit(), a.to_unit()),
            _ => return None,
        })
    }

    /// Writes one pixel; out-of-bounds writes are ignored.
    pub fn set_color(&mut self, x: u32, y: u32, color: Color) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let channels = self.channels as usize;
        write_color(&mut self.data[i..i + channels], color);
    }

    pub fn fill(&mut self, color: Color) {
        let channels = self.channels as usize;
        if channels == 0 {
            return;
        }
        for px in self.data.chunks_exact_mut(channels) {
            write_color(px, color);
        }
    }
}

fn write_color<T: PixelComponent>(px: &mut [T], color: Color) {
    match px {
        [v] => *v = T::from_unit((color.r + color.g + color.b) / 3.0),
        [r, g, b] => {
            *r = T::from_unit(color.r);
            *g = T::from_unit(color.g);
            *b = T::from_unit(color.b);
        }
        [r, g, b, a] => {
            *r = T::from_unit(color.r);
            *g = T::from_unit(color.g);
            *b = T::from_unit(color.b);
            *a = T::from_unit(color.a);
        }
        _ => {}
    }
}
