//! Geometry types shared by hosts, geometry sources and engines.
//!
//! Canonical space:
//! - device-independent (CSS-like) pixels
//! - origin top-left, +X right, +Y down
//!
//! Physical pixels only appear at rasterization time (`size * dpr`).

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
