use crate::paint::Color;

/// Whether closed shapes are filled or only outlined.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FillMode {
    #[default]
    Filled,
    Outline,
}

/// How the `(x, y)` of a rectangle is interpreted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum RectMode {
    /// `(x, y)` is the top-left corner.
    #[default]
    Corner,
    /// `(x, y)` is the center.
    Center,
}

/// Winding rule used when filling self-intersecting or multi-contour polygons.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PolyWindingMode {
    #[default]
    Odd,
    NonZero,
    Positive,
    Negative,
    AbsGeqTwo,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendMode {
    Disabled,
    #[default]
    Alpha,
    Add,
    Subtract,
    Multiply,
    Screen,
}

/// Placement policy for bitmap strings.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BitmapTextMode {
    #[default]
    Simple,
    Screen,
    Viewport,
    Model,
    ModelBillboard,
}

/// Drawing attribute snapshot.
///
/// Plain value: copying a `Style` never aliases another stack entry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub color: Color,
    pub background_color: Color,
    pub fill_mode: FillMode,
    pub rect_mode: RectMode,
    pub poly_mode: PolyWindingMode,
    pub line_width: f32,
    pub blend_mode: BlendMode,
    pub smoothing: bool,
    /// Segments used for circles and ellipses. Always > 0.
    pub circle_resolution: u32,
    /// Segments per curve span when flattening paths. Always > 0.
    pub curve_resolution: u32,
    pub bitmap_text_mode: BitmapTextMode,
}

impl Style {
    pub const DEFAULT_CIRCLE_RESOLUTION: u32 = 20;
    pub const DEFAULT_CURVE_RESOLUTION: u32 = 20;
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            background_color: Color::gray8(60),
            fill_mode: FillMode::Filled,
            rect_mode: RectMode::Corner,
            poly_mode: PolyWindingMode::Odd,
            line_width: 1.0,
            blend_mode: BlendMode::Alpha,
            smoothing: false,
            circle_resolution: Self::DEFAULT_CIRCLE_RESOLUTION,
            curve_resolution: Self::DEFAULT_CURVE_RESOLUTION,
            bitmap_text_mode: BitmapTextMode::Simple,
        }
    }
}
