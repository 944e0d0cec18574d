use glam::Vec2;

use crate::binding::ResourceId;
use crate::paint::{ChannelWidth, PixelComponent, Pixels};

use super::Anchor;

/// Pixel buffer plus the anchor used when it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: PixelComponent> {
    id: ResourceId,
    pixels: Pixels<T>,
    anchor: Anchor,
}

impl<T: PixelComponent> Image<T> {
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        Self::from_pixels(Pixels::new(width, height, channels))
    }

    pub fn from_pixels(pixels: Pixels<T>) -> Self {
        Self {
            id: ResourceId::next(),
            pixels,
            anchor: Anchor::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[inline]
    pub fn pixels(&self) -> &Pixels<T> {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut Pixels<T> {
        &mut self.pixels
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.pixels.width() as f32
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.pixels.height() as f32
    }

    #[inline]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Anchor as a fraction of the drawn size; `(0.5, 0.5)` centers the image.
    pub fn set_anchor_percent(&mut self, x: f32, y: f32) {
        self.anchor = Anchor::Percent(Vec2::new(x, y));
    }

    /// Anchor in image pixels.
    pub fn set_anchor_point(&mut self, x: f32, y: f32) {
        self.anchor = Anchor::Point(Vec2::new(x, y));
    }

    pub fn reset_anchor(&mut self) {
        self.anchor = Anchor::default();
    }
}

/// Borrowed image of any channel width.
#[derive(Debug, Copy, Clone)]
pub enum ImageRef<'a> {
    U8(&'a Image<u8>),
    U16(&'a Image<u16>),
    F32(&'a Image<f32>),
}

macro_rules! image_ref_dispatch {
    ($self:ident, $img:ident => $e:expr) => {
        match $self {
            ImageRef::U8($img) => $e,
            ImageRef::U16($img) => $e,
            ImageRef::F32($img) => $e,
        }
    };
}

impl ImageRef<'_> {
    pub fn id(self) -> ResourceId {
        image_ref_dispatch!(self, img => img.id())
    }

    pub fn size(self) -> Vec2 {
        image_ref_dispatch!(self, img => Vec2::new(img.width(), img.height()))
    }

    pub fn anchor(self) -> Anchor {
        image_ref_dispatch!(self, img => img.anchor())
    }

    pub fn channel_width(self) -> ChannelWidth {
        image_ref_dispatch!(self, img => img.pixels().channel_width())
    }

    pub fn is_allocated(self) -> bool {
        image_ref_dispatch!(self, img => img.pixels().is_allocated())
    }
}

impl<'a> From<&'a Image<u8>> for ImageRef<'a> {
    fn from(img: &'a Image<u8>) -> Self {
        ImageRef::U8(img)
    }
}

impl<'a> From<&'a Image<u16>> for ImageRef<'a> {
    fn from(img: &'a Image<u16>) -> Self {
        ImageRef::U16(img)
    }
}

impl<'a> From<&'a Image<f32>> for ImageRef<'a> {
    fn from(img: &'a Image<f32>) -> Self {
        ImageRef::F32(img)
    }
}

// ── video ─────────────────────────────────────────────────────────────────

/// Layout of a decoded video frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    Gray,
    Rgb,
    #[default]
    Rgba,
    /// Luma plane plus interleaved chroma plane.
    Nv12,
    /// Luma plane plus two quarter-size chroma planes.
    I420,
}

impl PixelFormat {
    pub const fn plane_count(self) -> usize {
        match self {
            PixelFormat::Gray | PixelFormat::Rgb | PixelFormat::Rgba => 1,
            PixelFormat::Nv12 => 2,
            PixelFormat::I420 => 3,
        }
    }
}

/// A source of video frames, such as a decoder or a camera grabber.
pub trait VideoSource {
    fn id(&self) -> ResourceId;

    /// Frame size in pixels.
    fn size(&self) -> Vec2;

    fn pixel_format(&self) -> PixelFormat;

    /// False until the first frame has been decoded.
    fn is_initialized(&self) -> bool;

    /// True when the current frame changed since the last update.
    fn is_frame_new(&self) -> bool;

    /// Pixel planes of the current frame, `pixel_format().plane_count()` long.
    fn planes(&self) -> &[Pixels<u8>];
}
