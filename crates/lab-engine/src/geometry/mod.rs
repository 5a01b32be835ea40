//! Geometry sources.
//!
//! A [`GeometrySource`] is the injectable stand-in for the platform's layout
//! registration points: per-element box observation, window-level resize
//! listeners, direct layout reads and the display's pixel ratio.
//! [`ManualGeometry`] is the in-process implementation driven by its caller.

mod manual;
mod source;

pub use manual::ManualGeometry;
pub use source::{BoxEntry, BoxObserver, GeometrySource, ListenerId, ObserverId, WindowListener};
