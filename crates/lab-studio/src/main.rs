mod args;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};

use lab_engine::core::{create_engine, Engine};
use lab_engine::engines::{PlaceholderOptions, SvgPlaceholder};
use lab_engine::geometry::ManualGeometry;
use lab_engine::host::HostSurface;
use lab_engine::logging::{init_logging, LoggingConfig};
use lab_engine::render::{rasterize, RasterImage};
use lab_engine::resize::attach_engine;
use lab_engine::time::ManualFrames;

use args::StudioConfig;

fn main() {
    init_logging(LoggingConfig::default());

    let config = match StudioConfig::parse(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        log::error!("studio run failed: {e:#}");
        std::process::exit(1);
    }
}

/// Replays `config.sizes` against a placeholder engine and writes one PNG per size.
fn run(config: &StudioConfig) -> Result<()> {
    let (w0, h0) = config.sizes.first().copied().unwrap_or((800.0, 400.0));
    let host = HostSurface::new(w0, h0);
    let geometry = Rc::new(ManualGeometry::new());
    let frames = Rc::new(ManualFrames::new());
    geometry.set_device_pixel_ratio(Some(config.dpr));

    let engine = create_engine::<SvgPlaceholder>(
        &host,
        PlaceholderOptions { label: config.label.clone() },
    )?;
    let engine = Rc::new(RefCell::new(engine));
    let subscription = attach_engine(&host, geometry.clone(), frames.clone(), engine.clone());

    std::fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed to create {}", config.out_dir.display()))?;

    for (i, &(w, h)) in config.sizes.iter().enumerate() {
        geometry.resize_host(&host, w, h);
        frames.run_frame();

        let image = rasterize(&host, config.dpr)?;
        let path = config.out_dir.join(format!("snapshot-{i}-{w}x{h}.png"));
        write_png(&path, &image)?;
        log::info!(
            "frame {}: wrote {} ({}x{} px)",
            frames.frame_index(),
            path.display(),
            image.width,
            image.height
        );
    }

    subscription.teardown();
    engine.borrow_mut().destroy();
    Ok(())
}

fn write_png(path: &Path, image: &RasterImage) -> Result<()> {
    image::save_buffer(
        path,
        &image.pixels,
        image.width,
        image.height,
        image::ExtendedColorType::Rgba8,
    )
    .with_context(|| format!("failed to write {}", path.display()))
}
