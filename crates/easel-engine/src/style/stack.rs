use crate::error::{check_resolution, RenderError, Result, StackKind};
use crate::paint::Color;

use super::{BitmapTextMode, BlendMode, FillMode, PolyWindingMode, RectMode, Style};

/// LIFO of [`Style`] values.
///
/// Invariant: never empty. The base entry cannot be popped; setters only touch
/// the top entry.
#[derive(Debug, Clone)]
pub struct StyleStack {
    stack: Vec<Style>,
}

impl Default for StyleStack {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl StyleStack {
    pub fn new(base: Style) -> Self {
        Self { stack: vec![base] }
    }

    /// The style consulted by draws without an explicit override.
    #[inline]
    pub fn current(&self) -> &Style {
        // Non-empty by construction.
        &self.stack[self.stack.len() - 1]
    }

    #[inline]
    fn top_mut(&mut self) -> &mut Style {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Number of entries, including the base.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Duplicates the current style.
    pub fn push(&mut self) {
        let top = *self.current();
        self.stack.push(top);
    }

    pub fn pop(&mut self) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(RenderError::StackUnderflow { stack: StackKind::Style });
        }
        self.stack.pop();
        Ok(())
    }

    /// Replaces the top entry wholesale.
    pub fn set(&mut self, style: Style) {
        *self.top_mut() = style;
    }

    // ── color ─────────────────────────────────────────────────────────────

    pub fn set_color(&mut self, color: Color) {
        self.top_mut().color = color;
    }

    pub fn set_color_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.set_color(Color::from_rgb8(r, g, b));
    }

    pub fn set_color_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.set_color(Color::from_rgba8(r, g, b, a));
    }

    pub fn set_color_with_alpha(&mut self, color: Color, a: u8) {
        self.set_color(color.with_alpha8(a));
    }

    pub fn set_color_gray(&mut self, brightness: u8) {
        self.set_color(Color::gray8(brightness));
    }

    pub fn set_hex_color(&mut self, hex: u32) {
        self.set_color(Color::from_hex(hex));
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.top_mut().background_color = color;
    }

    // ── modes ─────────────────────────────────────────────────────────────

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.top_mut().fill_mode = mode;
    }

    pub fn set_rect_mode(&mut self, mode: RectMode) {
        self.top_mut().rect_mode = mode;
    }

    pub fn set_poly_mode(&mut self, mode: PolyWindingMode) {
        self.top_mut().poly_mode = mode;
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.top_mut().blend_mode = mode;
    }

    pub fn set_bitmap_text_mode(&mut self, mode: BitmapTextMode) {
        self.top_mut().bitmap_text_mode = mode;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.top_mut().line_width = width;
    }

    pub fn set_smoothing(&mut self, enabled: bool) {
        self.top_mut().smoothing = enabled;
    }

    // ── resolutions ───────────────────────────────────────────────────────

    pub fn set_circle_resolution(&mut self, res: i32) -> Result<()> {
        self.top_mut().circle_resolution = check_resolution("circle", res)?;
        Ok(())
    }

    pub fn set_curve_resolution(&mut self, res: i32) -> Result<()> {
        self.top_mut().curve_resolution = check_resolution("curve", res)?;
        Ok(())
    }
}
