use glam::Vec2;

use crate::coords::Rect;
use crate::error::Result;
use crate::paint::Pixels;

use super::{Backend, Renderer};

impl<B: Backend> Renderer<B> {
    /// Copies a region of the current logical viewport into `pixels`.
    ///
    /// `(x, y)` is relative to the viewport's top-left in logical space. The
    /// region is clipped to the surface and `pixels` is reallocated as RGBA
    /// of the clipped size (empty when nothing remains).
    pub fn save_screen(&mut self, x: f32, y: f32, w: f32, h: f32, pixels: &mut Pixels<u8>) -> Result<()> {
        let state = self.viewport.state();
        let vp = self.viewport.current_viewport();
        let logical = Rect::new(vp.x() + x, vp.y() + y, w, h).normalized();
        let native = state.to_native(logical);
        let surface = Rect::from_origin_size(Vec2::ZERO, state.surface);

        let Some(region) = native.intersect(surface) else {
            pixels.allocate(0, 0, 4);
            return Ok(());
        };
        pixels.allocate(region.width() as u32, region.height() as u32, 4);
        self.backend.read_pixels(region, pixels)
    }

    pub fn save_full_viewport(&mut self, pixels: &mut Pixels<u8>) -> Result<()> {
        let vp = self.viewport.current_viewport();
        self.save_screen(0.0, 0.0, vp.width(), vp.height(), pixels)
    }
}
