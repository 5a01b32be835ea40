use crate::coords::{Vec2, Viewport};

/// Smallest side the placeholder lays out against.
pub const MIN_DIMENSION: f64 = 1.0;

const RING_CENTER: (f64, f64) = (0.78, 0.3);
const RING_RADIUS: f64 = 0.22;
const LABEL_ORIGIN: (f64, f64) = (0.075, 0.775);
const FONT_RATIO: f64 = 0.06;
const FONT_MIN: f64 = 16.0;
const FONT_MAX: f64 = 26.0;

/// Placeholder geometry derived from a host size.
///
/// Positions scale with the host; the label's font size follows the height
/// but stays within a readable range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaceholderLayout {
    /// Virtual coordinate space (`viewBox` size), never smaller than 1x1.
    pub view: Viewport,
    pub ring_center: Vec2,
    pub ring_radius: f64,
    pub label_origin: Vec2,
    pub font_size: f64,
}

impl PlaceholderLayout {
    pub fn compute(width: f64, height: f64) -> Self {
        let view = Viewport::new(width, height).clamped(MIN_DIMENSION);
        let (w, h) = (view.width, view.height);

        Self {
            view,
            ring_center: Vec2::new(RING_CENTER.0 * w, RING_CENTER.1 * h),
            ring_radius: RING_RADIUS * view.min_side(),
            label_origin: Vec2::new(LABEL_ORIGIN.0 * w, LABEL_ORIGIN.1 * h),
            font_size: (FONT_RATIO * h).clamp(FONT_MIN, FONT_MAX),
        }
    }
}
