use std::cell::Cell;
use std::rc::Rc;

use super::{FrameScheduler, FrameToken};

/// Single-slot debounce-to-frame primitive.
///
/// Holds at most one pending frame request. Scheduling while a request is
/// pending cancels it first, so only the most recently scheduled callback
/// ever runs. The slot empties itself when its callback runs.
pub struct FrameSlot {
    frames: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<Option<FrameToken>>>,
}

impl FrameSlot {
    pub fn new(frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            frames,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn schedule<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let pending = Rc::clone(&self.pending);
        let token = self.frames.request_frame(Box::new(move || {
            // Cleared before the callback so it can reschedule into this slot.
            pending.set(None);
            callback();
        }));
        self.pending.set(Some(token));
    }

    /// Cancels the pending request, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.pending.take() {
            self.frames.cancel_frame(token);
        }
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.pending.get().is_some()
    }
}
