use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Studio run configuration, parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub label: Option<String>,
    pub out_dir: PathBuf,
    pub dpr: f64,
    /// Host sizes to replay, in order.
    pub sizes: Vec<(f64, f64)>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            label: None,
            out_dir: PathBuf::from("snapshots"),
            dpr: 1.0,
            sizes: vec![(800.0, 400.0), (1600.0, 800.0)],
        }
    }
}

pub const USAGE: &str = "usage: lab-studio [--label TEXT] [--out DIR] [--dpr N] [WxH ...]";

impl StudioConfig {
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut sizes = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--label" => config.label = Some(value(&mut args, "--label")?),
                "--out" => config.out_dir = PathBuf::from(value(&mut args, "--out")?),
                "--dpr" => {
                    let raw = value(&mut args, "--dpr")?;
                    let dpr: f64 = raw.parse().with_context(|| format!("invalid --dpr {raw:?}"))?;
                    if !(dpr.is_finite() && dpr > 0.0) {
                        bail!("--dpr must be positive, got {dpr}");
                    }
                    config.dpr = dpr;
                }
                flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
                size => sizes.push(parse_size(size)?),
            }
        }

        if !sizes.is_empty() {
            config.sizes = sizes;
        }
        Ok(config)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().with_context(|| format!("{flag} expects a value"))
}

/// Parses `WxH` (e.g. `1600x800`). Zero is accepted; the engine clamps it.
fn parse_size(raw: &str) -> Result<(f64, f64)> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .with_context(|| format!("invalid size {raw:?}, expected WxH"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("invalid width in {raw:?}"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("invalid height in {raw:?}"))?;
    if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
        bail!("size {raw:?} must be finite and non-negative");
    }
    Ok((w, h))
}
