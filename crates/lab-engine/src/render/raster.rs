use anyhow::{bail, Context, Result};
use resvg::{tiny_skia, usvg};

use crate::host::HostSurface;

/// Straight-alpha RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// RGBA of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Largest pixmap side, in physical pixels.
pub const MAX_SIDE: u32 = 8192;

/// Renders `host`'s scene at `dpr` physical pixels per logical pixel.
///
/// Non-positive or non-finite `dpr` renders at 1x. Fails when either side
/// of the output would exceed [`MAX_SIDE`].
pub fn rasterize(host: &HostSurface, dpr: f64) -> Result<RasterImage> {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let size = host.content_size().clamped(1.0);
    let width = physical(size.width, dpr).context("host too wide to rasterize")?;
    let height = physical(size.height, dpr).context("host too tall to rasterize")?;

    let markup = host.to_markup();
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(&markup, &options).context("failed to parse host scene")?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .with_context(|| format!("failed to allocate {width}x{height} pixmap"))?;

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(dpr as f32, dpr as f32),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied pixels.
    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    log::debug!("rasterized host at {width}x{height} (dpr {dpr})");
    Ok(RasterImage { width, height, pixels })
}

fn physical(logical: f64, dpr: f64) -> Result<u32> {
    let px = (logical * dpr).ceil().max(1.0);
    if px > f64::from(MAX_SIDE) {
        bail!("{logical} px at dpr {dpr} needs {px} physical px, limit is {MAX_SIDE}");
    }
    Ok(px as u32)
}
