use std::cell::Cell;

use glam::{Mat4, Vec2};

use crate::coords::Rect;
use crate::transform::Handedness;

use super::Orientation;

/// Complete viewport description; cheap to copy and snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportState {
    /// Viewport in backend pixel space, y measured from the bottom.
    pub native: Rect,
    /// Size of the render surface (window or off-screen target) in native pixels.
    pub surface: Vec2,
    pub orientation: Orientation,
    pub v_flipped: bool,
    pub handedness: Handedness,
}

impl ViewportState {
    pub fn new(surface: Vec2, v_flipped: bool, orientation: Orientation, handedness: Handedness) -> Self {
        Self {
            native: Rect::from_origin_size(Vec2::ZERO, surface),
            surface,
            orientation,
            v_flipped,
            handedness,
        }
    }

    /// Surface size as seen through the orientation.
    #[inline]
    pub fn logical_surface(&self) -> Vec2 {
        self.orientation.oriented_size(self.surface)
    }

    /// The native viewport with flip and orientation applied.
    pub fn logical(&self) -> Rect {
        self.to_logical(self.native)
    }

    /// Maps any native-space rectangle into logical space.
    pub fn to_logical(&self, native: Rect) -> Rect {
        let mut r = native;
        if self.v_flipped {
            r.origin.y = self.surface.y - r.origin.y - r.size.y;
        }
        self.orientation.apply_to_rect(r, self.surface)
    }

    /// Maps a logical-space rectangle back into native space.
    pub fn to_native(&self, logical: Rect) -> Rect {
        let mut r = self.orientation.inverse().apply_to_rect(logical, self.logical_surface());
        if self.v_flipped {
            r.origin.y = self.surface.y - r.origin.y - r.size.y;
        }
        r
    }
}

/// Owns the current [`ViewportState`] and the derived orientation matrix.
///
/// The orientation matrix is cached and invalidated whenever orientation,
/// flip or handedness change; it is never pushed into a matrix stack from
/// here.
#[derive(Debug, Clone)]
pub struct ViewportManager {
    state: ViewportState,
    orientation_matrix: Cell<Option<Mat4>>,
}

impl ViewportManager {
    pub fn new(state: ViewportState) -> Self {
        Self {
            state,
            orientation_matrix: Cell::new(None),
        }
    }

    #[inline]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Replaces the whole state, e.g. when leaving a render target.
    pub fn restore(&mut self, state: ViewportState) {
        self.state = state;
        self.orientation_matrix.set(None);
    }

    /// Changes the render surface size; the viewport is reset to cover it.
    pub fn set_surface_size(&mut self, size: Vec2) {
        self.state.surface = size;
        self.state.native = Rect::from_origin_size(Vec2::ZERO, size);
    }

    /// Sets the viewport from a logical rectangle.
    ///
    /// A width or height `<= 0` takes the logical surface's. With `v_flip`,
    /// `rect` is in top-left logical coordinates and converted through the
    /// current flip; without it the y coordinate is taken as native.
    pub fn set_viewport(&mut self, rect: Rect, v_flip: bool) {
        let surface = self.state.logical_surface();
        let mut rect = rect;
        if rect.size.x <= 0.0 {
            rect.size.x = surface.x;
        }
        if rect.size.y <= 0.0 {
            rect.size.y = surface.y;
        }

        let native = if v_flip {
            self.state.to_native(rect)
        } else {
            let mut unflipped = self.state;
            unflipped.v_flipped = false;
            unflipped.to_native(rect)
        };
        log::debug!("viewport set: logical {rect:?} -> native {native:?}");
        self.state.native = native;
    }

    /// Sets the native viewport directly, bypassing flip and orientation.
    pub fn set_native_viewport(&mut self, rect: Rect) {
        self.state.native = rect;
    }

    pub fn set_orientation(&mut self, orientation: Orientation, v_flip: bool) {
        self.state.orientation = orientation;
        self.state.v_flipped = v_flip;
        self.orientation_matrix.set(None);
    }

    pub fn set_handedness(&mut self, handedness: Handedness) {
        self.state.handedness = handedness;
        self.orientation_matrix.set(None);
    }

    #[inline]
    pub fn current_viewport(&self) -> Rect {
        self.state.logical()
    }

    #[inline]
    pub fn native_viewport(&self) -> Rect {
        self.state.native
    }

    #[inline]
    pub fn viewport_width(&self) -> f32 {
        self.current_viewport().size.x
    }

    #[inline]
    pub fn viewport_height(&self) -> f32 {
        self.current_viewport().size.y
    }

    #[inline]
    pub fn is_v_flipped(&self) -> bool {
        self.state.v_flipped
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    #[inline]
    pub fn handedness(&self) -> Handedness {
        self.state.handedness
    }

    pub fn orientation_matrix(&self) -> Mat4 {
        if let Some(m) = self.orientation_matrix.get() {
            return m;
        }
        let m = self.state.orientation.matrix(self.state.v_flipped, self.state.handedness);
        self.orientation_matrix.set(Some(m));
        m
    }
}
