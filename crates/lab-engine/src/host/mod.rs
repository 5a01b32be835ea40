//! Host surfaces: the containers engines render into.

mod surface;

pub use surface::HostSurface;
