use super::{Vec2, Viewport};

/// Axis-aligned rectangle in device-independent pixels.
///
/// `origin` is the top-left corner. `size` may be zero or negative when it
/// comes straight from a geometry source; nothing here normalizes it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Viewport,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Viewport::new(width, height),
        }
    }

    /// Rectangle of the given size anchored at the origin.
    #[inline]
    pub const fn from_size(size: Viewport) -> Self {
        Self { origin: Vec2::zero(), size }
    }
}
