//! Rasterization of hosted scenes.
//!
//! Serializes a host's scene tree and renders it with `resvg` at physical
//! resolution (`content size * dpr`).

mod raster;

pub use raster::{rasterize, RasterImage};
