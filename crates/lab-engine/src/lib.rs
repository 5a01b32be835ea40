//! UI lab engine crate.
//!
//! Owns the pieces a host application needs to put a visual engine on a
//! container and keep its layout in step with the container's size:
//! host surfaces, the injectable geometry and frame-scheduling capabilities,
//! the resize coordinator, the engine contract and the bundled engines.

pub mod coords;
pub mod core;
pub mod engines;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod render;
pub mod resize;
pub mod scene;
pub mod time;
