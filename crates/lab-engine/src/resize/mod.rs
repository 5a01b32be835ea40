//! Resize coordination.
//!
//! Turns noisy geometry signals (box observations, window resize events)
//! into at most one notification per display refresh, carrying the latest
//! size and the device pixel ratio read at delivery time.
//!
//! ```rust,ignore
//! let sub = observe_resize(&host, geometry.clone(), frames.clone(), |info| {
//!     log::info!("host is now {}x{} @{}x", info.width, info.height, info.dpr);
//! });
//! // ... later
//! sub.teardown();
//! ```

mod attach;
mod coordinator;
mod info;

pub use attach::attach_engine;
pub use coordinator::{observe_resize, CoordinatorState, Subscription};
pub use info::ResizeInfo;
