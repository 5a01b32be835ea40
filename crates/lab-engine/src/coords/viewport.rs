/// Box size in device-independent pixels.
///
/// Used for host content boxes and for the sizes carried by observation
/// entries. No validation happens on construction: zero, negative and
/// non-finite sizes are representable and flow through unchanged until a
/// consumer calls [`Viewport::clamped`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns a copy with both sides raised to at least `min`.
    ///
    /// Non-finite sides collapse to `min`.
    pub fn clamped(self, min: f64) -> Self {
        let side = |v: f64| if v.is_finite() { v.max(min) } else { min };
        Self::new(side(self.width), side(self.height))
    }

    #[inline]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }
}
