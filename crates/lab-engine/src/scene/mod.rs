//! Retained SVG scene tree.
//!
//! Engines build their visuals as [`SvgNode`] trees and attach the root to a
//! host surface. Nodes are shared handles, so an engine can keep a handle to
//! any element and mutate its attributes in place on resize.

mod markup;
mod node;

pub use markup::format_number;
pub use node::SvgNode;

/// SVG namespace emitted on outermost `<svg>` elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
