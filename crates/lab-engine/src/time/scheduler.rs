/// Work queued for the next display refresh.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Handle identifying one pending frame request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Schedules callbacks onto the next display refresh.
///
/// Contract for implementers:
/// - callbacks never run inside `request_frame`; they run on a later refresh
/// - `cancel_frame` on a token whose callback already ran (or was cancelled) is a no-op
/// - no internal borrows are held while a callback runs, so callbacks may
///   request or cancel frames themselves
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken;

    fn cancel_frame(&self, token: FrameToken);
}
