use anyhow::Result;

use crate::host::HostSurface;

use super::Engine;

/// Construction side of the engine contract.
///
/// `create` performs all initial rendering before returning, so the host
/// shows content immediately; the first real layout arrives with the first
/// resize notification.
pub trait EngineFactory: Engine + Sized {
    /// Recognized configuration fields for this engine.
    type Options: Default;

    fn create(host: &HostSurface, options: Self::Options) -> Result<Self>;
}

/// Creates engine `E` on `host`.
pub fn create_engine<E>(host: &HostSurface, options: E::Options) -> Result<E>
where
    E: EngineFactory,
{
    let engine = E::create(host, options)?;
    log::debug!("created {} on {:?}", std::any::type_name::<E>(), host);
    Ok(engine)
}
