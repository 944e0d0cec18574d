use crate::paint::Color;
use crate::transform::Handedness;
use crate::view::Orientation;

/// Initial state of a [`Renderer`](super::Renderer).
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Render surface size in native pixels.
    pub width: f32,
    pub height: f32,

    pub handedness: Handedness,

    /// Measure logical y from the top of the surface.
    pub v_flip: bool,

    pub orientation: Orientation,

    pub background: Color,

    /// Clear with `background` at the start of every frame.
    pub background_auto: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            handedness: Handedness::Right,
            v_flip: true,
            orientation: Orientation::Default,
            background: Color::gray8(60),
            background_auto: true,
        }
    }
}
