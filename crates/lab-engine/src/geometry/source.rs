use std::rc::Rc;

use crate::coords::{Rect, Viewport};
use crate::host::HostSurface;

/// One box-observation record.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxEntry {
    /// Content box size at the time of observation.
    pub content: Viewport,
}

/// Callback receiving a batch of box-observation entries.
pub type BoxObserver = Rc<dyn Fn(&[BoxEntry])>;

/// Callback fired on window-level resize events.
pub type WindowListener = Rc<dyn Fn()>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObserverId(pub u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(pub u64);

/// Platform geometry capability.
///
/// Implementations must not hold internal borrows while invoking callbacks:
/// a callback may detach itself (or anything else) while it runs.
pub trait GeometrySource {
    /// Starts observing `host`'s box geometry.
    ///
    /// Returns `None` when the platform has no box observation; callers fall
    /// back to window events and direct reads.
    fn observe_box(&self, host: &HostSurface, callback: BoxObserver) -> Option<ObserverId>;

    fn unobserve_box(&self, id: ObserverId);

    fn add_window_listener(&self, callback: WindowListener) -> ListenerId;

    fn remove_window_listener(&self, id: ListenerId);

    /// Reads the host's current bounding geometry directly.
    fn bounding_rect(&self, host: &HostSurface) -> Rect;

    /// Current device pixel ratio, if the display reports one.
    fn device_pixel_ratio(&self) -> Option<f64>;
}
