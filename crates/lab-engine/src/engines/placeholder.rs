use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Result};

use crate::core::{Capabilities, Engine, EngineFactory, Resizable};
use crate::host::HostSurface;
use crate::scene::{format_number, SvgNode};

use super::PlaceholderLayout;

pub const DEFAULT_LABEL: &str = "SVG engine placeholder";

/// Design size the placeholder renders at before the first resize.
const DESIGN_SIZE: (f64, f64) = (800.0, 400.0);

const FONT_FAMILY: &str = r#""Space Grotesk", "Avenir Next", sans-serif"#;

static NEXT_GRADIENT: AtomicU64 = AtomicU64::new(0);

/// Options recognized by [`SvgPlaceholder`].
#[derive(Debug, Clone, Default)]
pub struct PlaceholderOptions {
    /// Text shown in the lower-left corner. Defaults to [`DEFAULT_LABEL`].
    pub label: Option<String>,
}

/// Handles to the nodes `resize` mutates.
struct Nodes {
    svg: SvgNode,
    background: SvgNode,
    ring: SvgNode,
    label: SvgNode,
}

/// Static SVG placeholder: gradient background, decorative ring and a label.
///
/// Has no ongoing work, so it only offers the resize capability.
pub struct SvgPlaceholder {
    host: Option<HostSurface>,
    nodes: Option<Nodes>,
    layout: Option<PlaceholderLayout>,
}

impl SvgPlaceholder {
    /// Root `<svg>` attached to the host, until destroyed.
    pub fn root(&self) -> Option<&SvgNode> {
        self.nodes.as_ref().map(|n| &n.svg)
    }

    /// Layout currently applied to the scene.
    pub fn layout(&self) -> Option<PlaceholderLayout> {
        self.layout
    }

    pub fn is_destroyed(&self) -> bool {
        self.nodes.is_none()
    }

    fn apply(&mut self, layout: PlaceholderLayout) {
        let Some(nodes) = &self.nodes else {
            return;
        };
        let (w, h) = (layout.view.width, layout.view.height);

        nodes
            .svg
            .set_attr("viewBox", format!("0 0 {} {}", format_number(w), format_number(h)));

        nodes.background.set_number("width", w);
        nodes.background.set_number("height", h);

        nodes.ring.set_number("cx", layout.ring_center.x);
        nodes.ring.set_number("cy", layout.ring_center.y);
        nodes.ring.set_number("r", layout.ring_radius);

        nodes.label.set_number("x", layout.label_origin.x);
        nodes.label.set_number("y", layout.label_origin.y);
        nodes.label.set_number("font-size", layout.font_size);

        self.layout = Some(layout);
    }
}

fn build_scene(label: &str) -> Nodes {
    let gradient_id = format!("ui-lab-gradient-{}", NEXT_GRADIENT.fetch_add(1, Ordering::Relaxed));

    // Scales with the host; `slice` covers the surface, cropping if needed.
    let svg = SvgNode::new("svg")
        .with_attr("viewBox", "0 0 800 400")
        .with_attr("preserveAspectRatio", "xMidYMid slice")
        .with_attr("aria-hidden", "true")
        .with_attr("width", "100%")
        .with_attr("height", "100%")
        .with_attr("style", "display:block");

    let gradient = SvgNode::new("linearGradient")
        .with_attr("id", gradient_id.clone())
        .with_attr("x1", "0")
        .with_attr("y1", "0")
        .with_attr("x2", "1")
        .with_attr("y2", "1");
    gradient.append(
        SvgNode::new("stop")
            .with_attr("offset", "0%")
            .with_attr("stop-color", "#f4ede4"),
    );
    gradient.append(
        SvgNode::new("stop")
            .with_attr("offset", "100%")
            .with_attr("stop-color", "#d9c7b6"),
    );
    let defs = SvgNode::new("defs");
    defs.append(gradient);

    let background = SvgNode::new("rect")
        .with_attr("x", "0")
        .with_attr("y", "0")
        .with_attr("width", "800")
        .with_attr("height", "400")
        .with_attr("fill", format!("url(#{gradient_id})"));

    let ring = SvgNode::new("circle")
        .with_attr("cx", "0")
        .with_attr("cy", "0")
        .with_attr("r", "0")
        .with_attr("fill", "none")
        .with_attr("stroke", "#5a4d41")
        .with_attr("stroke-width", "1.5")
        .with_attr("opacity", "0.35");

    let text = SvgNode::new("text")
        .with_attr("x", "0")
        .with_attr("y", "0")
        .with_attr("fill", "#3a3128")
        .with_attr("font-size", "20")
        .with_attr("font-family", FONT_FAMILY)
        .with_attr("letter-spacing", "2")
        .with_attr("text-transform", "uppercase");
    text.set_text(label);

    svg.append(defs);
    svg.append(background.clone());
    svg.append(ring.clone());
    svg.append(text.clone());

    Nodes {
        svg,
        background,
        ring,
        label: text,
    }
}

impl EngineFactory for SvgPlaceholder {
    type Options = PlaceholderOptions;

    fn create(host: &HostSurface, options: PlaceholderOptions) -> Result<Self> {
        if !host.is_mounted() {
            bail!("cannot create placeholder: host surface is not mounted");
        }

        let label = options.label.as_deref().unwrap_or(DEFAULT_LABEL);
        let nodes = build_scene(label);
        host.append(nodes.svg.clone());

        let mut engine = Self {
            host: Some(host.clone()),
            nodes: Some(nodes),
            layout: None,
        };
        engine.apply(PlaceholderLayout::compute(DESIGN_SIZE.0, DESIGN_SIZE.1));

        log::debug!("svg placeholder created with label {label:?}");
        Ok(engine)
    }
}

impl Engine for SvgPlaceholder {
    fn destroy(&mut self) {
        let (Some(host), Some(nodes)) = (self.host.take(), self.nodes.take()) else {
            log::trace!("svg placeholder already destroyed");
            return;
        };

        host.remove(&nodes.svg);
        self.layout = None;
        log::debug!("svg placeholder destroyed");
    }

    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        Some(self)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { pause: false, resize: true }
    }
}

impl Resizable for SvgPlaceholder {
    fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        if self.nodes.is_none() {
            log::trace!("resize after destroy ignored");
            return;
        }

        let layout = PlaceholderLayout::compute(width, height);
        log::trace!(
            "svg placeholder layout {}x{} (dpr {dpr})",
            layout.view.width,
            layout.view.height
        );
        self.apply(layout);
    }
}
