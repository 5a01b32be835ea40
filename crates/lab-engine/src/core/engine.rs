/// Optional capabilities an engine supports.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Capabilities {
    pub pause: bool,
    pub resize: bool,
}

/// Contract implemented by every visual engine.
pub trait Engine {
    /// Releases everything the engine created (scene nodes, timers, listeners).
    ///
    /// Hosts call this at most once. Engines in this crate treat a second
    /// call as a no-op.
    fn destroy(&mut self);

    /// Returns the pause/resume capability, if supported.
    fn as_pausable(&mut self) -> Option<&mut dyn Pausable> {
        None
    }

    /// Returns the resize capability, if supported.
    fn as_resizable(&mut self) -> Option<&mut dyn Resizable> {
        None
    }

    /// Which optional capabilities this engine offers.
    ///
    /// Must agree with [`Engine::as_pausable`] / [`Engine::as_resizable`]:
    /// an engine overriding an accessor overrides this too.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }
}

/// Engines with ongoing work that can be suspended.
pub trait Pausable: Engine {
    fn pause(&mut self);

    fn resume(&mut self);
}

/// Engines that recompute their layout for a new host size.
///
/// `resize` may be called any number of times, in any order relative to
/// pause/resume, and must tolerate zero, negative and non-finite sizes.
pub trait Resizable: Engine {
    fn resize(&mut self, width: f64, height: f64, dpr: f64);
}
