use std::cell::RefCell;
use std::rc::Rc;

use crate::core::Resizable;
use crate::geometry::GeometrySource;
use crate::host::HostSurface;
use crate::time::FrameScheduler;

use super::{observe_resize, Subscription};

/// Forwards resize notifications for `host` to `engine`.
///
/// The engine is shared so the host application can keep driving it
/// (pause, destroy) while the subscription is live.
///
/// If the engine is already borrowed when a frame delivers, that
/// notification is dropped, not retried. The engine keeps its previous
/// layout until the next geometry signal (a box resize or a window resize
/// event, which re-delivers the last known size). Do not hold a borrow of the
/// engine across frames.
#[must_use = "dropping the Subscription detaches the engine"]
pub fn attach_engine<E>(
    host: &HostSurface,
    geometry: Rc<dyn GeometrySource>,
    frames: Rc<dyn FrameScheduler>,
    engine: Rc<RefCell<E>>,
) -> Subscription
where
    E: Resizable + 'static,
{
    observe_resize(host, geometry, frames, move |info| {
        match engine.try_borrow_mut() {
            Ok(mut engine) => engine.resize(info.width, info.height, info.dpr),
            Err(_) => log::warn!(
                "engine busy; dropped resize to {}x{}",
                info.width,
                info.height
            ),
        }
    })
}
