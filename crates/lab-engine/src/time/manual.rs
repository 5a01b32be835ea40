use std::cell::{Cell, RefCell};

use super::{FrameCallback, FrameScheduler, FrameToken};

/// Frame scheduler driven explicitly by the caller.
///
/// Each [`ManualFrames::run_frame`] call stands in for one display refresh.
#[derive(Default)]
pub struct ManualFrames {
    next_token: Cell<u64>,
    queue: RefCell<Vec<(FrameToken, FrameCallback)>>,
    frame_index: Cell<u64>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of frames run so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index.get()
    }

    /// Runs one frame and returns how many callbacks executed.
    ///
    /// Only callbacks queued before this call are eligible. Callbacks
    /// requested while the frame runs wait for the next one, and a callback
    /// cancelled by an earlier callback of the same frame does not run.
    pub fn run_frame(&self) -> usize {
        let due: Vec<FrameToken> = self.queue.borrow().iter().map(|(t, _)| *t).collect();
        let mut ran = 0;

        for token in due {
            // Borrow is released before the callback runs.
            let callback = {
                let mut queue = self.queue.borrow_mut();
                queue
                    .iter()
                    .position(|(t, _)| *t == token)
                    .map(|idx| queue.remove(idx).1)
            };

            if let Some(callback) = callback {
                callback();
                ran += 1;
            }
        }

        self.frame_index.set(self.frame_index.get().wrapping_add(1));
        ran
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let token = FrameToken::from_raw(self.next_token.get());
        self.next_token.set(self.next_token.get().wrapping_add(1));
        self.queue.borrow_mut().push((token, callback));
        token
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.queue.borrow_mut().retain(|(t, _)| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() -> FrameCallback) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        (hits, move || {
            let h = Rc::clone(&h);
            Box::new(move || h.set(h.get() + 1)) as FrameCallback
        })
    }

    #[test]
    fn callbacks_wait_for_run_frame() {
        let frames = ManualFrames::new();
        let (hits, cb) = counter();

        frames.request_frame(cb());
        frames.request_frame(cb());
        assert_eq!(hits.get(), 0);
        assert_eq!(frames.pending(), 2);

        assert_eq!(frames.run_frame(), 2);
        assert_eq!(hits.get(), 2);
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.frame_index(), 1);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let frames = ManualFrames::new();
        let (hits, cb) = counter();

        let token = frames.request_frame(cb());
        frames.cancel_frame(token);
        frames.cancel_frame(token);

        assert_eq!(frames.run_frame(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn requests_made_during_a_frame_run_next_frame() {
        let frames = Rc::new(ManualFrames::new());
        let (hits, cb) = counter();

        let f = Rc::clone(&frames);
        let inner = cb();
        frames.request_frame(Box::new(move || {
            f.request_frame(inner);
        }));

        assert_eq!(frames.run_frame(), 1);
        assert_eq!(hits.get(), 0);
        assert_eq!(frames.run_frame(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancel_from_earlier_callback_in_same_frame() {
        let frames = Rc::new(ManualFrames::new());
        let (hits, cb) = counter();

        let victim = Rc::new(Cell::new(None));
        let (f, v) = (Rc::clone(&frames), Rc::clone(&victim));
        frames.request_frame(Box::new(move || {
            if let Some(token) = v.get() {
                f.cancel_frame(token);
            }
        }));
        victim.set(Some(frames.request_frame(cb())));

        assert_eq!(frames.run_frame(), 1);
        assert_eq!(hits.get(), 0);
    }
}
