//! Display-refresh scheduling.
//!
//! Provides the "run on the next frame" primitive the resize coordinator
//! debounces against, without coupling to any particular event loop:
//! - [`FrameScheduler`] is the injectable capability (request / cancel)
//! - [`ManualFrames`] is a caller-driven scheduler for tools and tests
//! - [`FrameSlot`] holds at most one pending request and replaces it on reschedule

mod manual;
mod scheduler;
mod slot;

pub use manual::ManualFrames;
pub use scheduler::{FrameCallback, FrameScheduler, FrameToken};
pub use slot::FrameSlot;
