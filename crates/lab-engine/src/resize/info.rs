/// Normalized resize notification.
///
/// `width`/`height` are passed through from the geometry source unmodified
/// (they may be zero or negative). `dpr` is always finite and positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResizeInfo {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl ResizeInfo {
    /// Builds a notification, substituting `1.0` for a missing or unusable
    /// device pixel ratio.
    pub fn new(width: f64, height: f64, dpr: Option<f64>) -> Self {
        Self {
            width,
            height,
            dpr: normalize_dpr(dpr),
        }
    }
}

fn normalize_dpr(dpr: Option<f64>) -> f64 {
    match dpr {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 1.0,
    }
}
