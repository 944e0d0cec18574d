use glam::Vec2;

/// Draw origin of a sized drawable.
///
/// The default anchor is the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Anchor {
    /// Offset in the drawable's native units.
    Point(Vec2),
    /// Offset as a fraction of the drawn size (`0.5` = center).
    Percent(Vec2),
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::Point(Vec2::ZERO)
    }
}

impl Anchor {
    /// Amount to subtract from the draw position for a draw of `size`.
    #[inline]
    pub fn offset(self, size: Vec2) -> Vec2 {
        match self {
            Anchor::Point(p) => p,
            Anchor::Percent(pct) => size * pct,
        }
    }
}
