use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::coords::Viewport;
use crate::geometry::{BoxEntry, GeometrySource, ListenerId, ObserverId};
use crate::host::HostSurface;
use crate::time::{FrameScheduler, FrameSlot};

use super::ResizeInfo;

/// Observable coordinator state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CoordinatorState {
    /// No delivery pending.
    Idle,
    /// A delivery is waiting for the next frame.
    Scheduled,
    /// Terminal; nothing is delivered any more.
    TornDown,
}

struct ResizeCoordinator {
    host: HostSurface,
    geometry: Rc<dyn GeometrySource>,
    slot: FrameSlot,
    /// Last width/height seen from either path. Zero means "unknown".
    last: Cell<Viewport>,
    torn_down: Cell<bool>,
    observer: Cell<Option<ObserverId>>,
    listener: Cell<Option<ListenerId>>,
    on_resize: RefCell<Box<dyn FnMut(ResizeInfo)>>,
}

impl ResizeCoordinator {
    fn on_box_entries(self: &Rc<Self>, entries: &[BoxEntry]) {
        let Some(entry) = entries.first() else {
            return;
        };
        self.last.set(entry.content);
        self.request_delivery(entry.content);
    }

    fn on_window_resize(self: &Rc<Self>) {
        let last = self.last.get();
        if is_known(last.width) && is_known(last.height) {
            self.request_delivery(last);
            return;
        }

        // Box observation has not reported yet: read layout directly.
        let size = self.geometry.bounding_rect(&self.host).size;
        self.last.set(size);
        self.request_delivery(size);
    }

    /// Replaces any pending delivery with one for `size`.
    fn request_delivery(self: &Rc<Self>, size: Viewport) {
        if self.torn_down.get() {
            return;
        }

        let weak = Rc::downgrade(self);
        self.slot.schedule(move || {
            if let Some(this) = weak.upgrade() {
                this.deliver(size);
            }
        });
    }

    fn deliver(&self, size: Viewport) {
        if self.torn_down.get() {
            return;
        }

        // DPR is read now, not when the delivery was requested.
        let info = ResizeInfo::new(size.width, size.height, self.geometry.device_pixel_ratio());
        log::trace!("resize delivery {}x{} @{}", info.width, info.height, info.dpr);

        let mut on_resize = self.on_resize.borrow_mut();
        (*on_resize)(info);
    }

    fn teardown(&self) {
        if self.torn_down.replace(true) {
            return;
        }

        self.slot.cancel();
        if let Some(id) = self.observer.take() {
            self.geometry.unobserve_box(id);
        }
        if let Some(id) = self.listener.take() {
            self.geometry.remove_window_listener(id);
        }
        log::debug!("resize coordinator torn down for {:?}", self.host);
    }

    fn state(&self) -> CoordinatorState {
        if self.torn_down.get() {
            CoordinatorState::TornDown
        } else if self.slot.is_scheduled() {
            CoordinatorState::Scheduled
        } else {
            CoordinatorState::Idle
        }
    }
}

#[inline]
fn is_known(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// Teardown handle returned by [`observe_resize`].
///
/// [`Subscription::teardown`] cancels any pending delivery and detaches the
/// box observer and window listener. It is idempotent, and dropping the
/// handle tears down as well, so bind it for as long as notifications are
/// wanted.
#[must_use = "dropping the Subscription tears the coordinator down"]
pub struct Subscription {
    coordinator: Rc<ResizeCoordinator>,
}

impl Subscription {
    pub fn teardown(&self) {
        self.coordinator.teardown();
    }

    pub fn state(&self) -> CoordinatorState {
        self.coordinator.state()
    }

    /// Last width/height the coordinator saw (zero until known).
    pub fn last_known_size(&self) -> Viewport {
        self.coordinator.last.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.coordinator.teardown();
    }
}

/// Starts coordinating resize notifications for `host`.
///
/// Attaches a box observer and a window listener through `geometry`, then
/// runs the window handler once synchronously so a first notification is
/// delivered on the next frame even if the host never changes size.
///
/// `on_resize` runs inside frame callbacks. A panic there propagates out of
/// the frame scheduler.
#[must_use = "dropping the Subscription tears the coordinator down"]
pub fn observe_resize<F>(
    host: &HostSurface,
    geometry: Rc<dyn GeometrySource>,
    frames: Rc<dyn FrameScheduler>,
    on_resize: F,
) -> Subscription
where
    F: FnMut(ResizeInfo) + 'static,
{
    let coordinator = Rc::new(ResizeCoordinator {
        host: host.clone(),
        geometry: geometry.clone(),
        slot: FrameSlot::new(frames),
        last: Cell::new(Viewport::default()),
        torn_down: Cell::new(false),
        observer: Cell::new(None),
        listener: Cell::new(None),
        on_resize: RefCell::new(Box::new(on_resize)),
    });

    let weak: Weak<ResizeCoordinator> = Rc::downgrade(&coordinator);
    let observer = geometry.observe_box(
        host,
        Rc::new(move |entries: &[BoxEntry]| {
            if let Some(this) = weak.upgrade() {
                this.on_box_entries(entries);
            }
        }),
    );
    if observer.is_none() {
        log::debug!("box observation unavailable; relying on window events for {host:?}");
    }
    coordinator.observer.set(observer);

    let weak = Rc::downgrade(&coordinator);
    let listener = geometry.add_window_listener(Rc::new(move || {
        if let Some(this) = weak.upgrade() {
            this.on_window_resize();
        }
    }));
    coordinator.listener.set(Some(listener));

    coordinator.on_window_resize();
    log::debug!("resize coordinator attached to {host:?}");

    Subscription { coordinator }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::geometry::ManualGeometry;
    use crate::time::ManualFrames;

    struct Rig {
        host: HostSurface,
        geometry: Rc<ManualGeometry>,
        frames: Rc<ManualFrames>,
        seen: Rc<RefCell<Vec<ResizeInfo>>>,
    }

    impl Rig {
        fn new(width: f64, height: f64) -> Self {
            Self {
                host: HostSurface::new(width, height),
                geometry: Rc::new(ManualGeometry::new()),
                frames: Rc::new(ManualFrames::new()),
                seen: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn observe(&self) -> Subscription {
            let seen = Rc::clone(&self.seen);
            observe_resize(
                &self.host,
                self.geometry.clone(),
                self.frames.clone(),
                move |info| seen.borrow_mut().push(info),
            )
        }

        fn seen(&self) -> Vec<ResizeInfo> {
            self.seen.borrow().clone()
        }
    }

    fn info(width: f64, height: f64, dpr: f64) -> ResizeInfo {
        ResizeInfo { width, height, dpr }
    }

    // ── seeding ───────────────────────────────────────────────────────────

    #[test]
    fn initial_notification_without_any_resize() {
        let rig = Rig::new(800.0, 400.0);
        let sub = rig.observe();

        assert!(rig.seen().is_empty(), "delivery waits for the next frame");
        assert_eq!(sub.state(), CoordinatorState::Scheduled);

        rig.frames.run_frame();
        assert_eq!(rig.seen(), vec![info(800.0, 400.0, 1.0)]);
        assert_eq!(sub.state(), CoordinatorState::Idle);
    }

    #[test]
    fn seeding_reads_bounding_rect() {
        let rig = Rig::new(800.0, 400.0);
        rig.host.set_bounding_rect(Some(Rect::new(0.0, 0.0, 810.0, 410.0)));
        let sub = rig.observe();

        rig.frames.run_frame();
        assert_eq!(rig.seen(), vec![info(810.0, 410.0, 1.0)]);
        assert_eq!(sub.last_known_size(), Viewport::new(810.0, 410.0));
    }

    #[test]
    fn seeding_works_without_box_observation() {
        let rig = Rig::new(320.0, 240.0);
        rig.geometry.set_box_observation(false);
        let _sub = rig.observe();

        rig.frames.run_frame();
        assert_eq!(rig.seen(), vec![info(320.0, 240.0, 1.0)]);
        assert_eq!(rig.geometry.observer_count(), 0);
        assert_eq!(rig.geometry.listener_count(), 1);
    }

    // ── coalescing ────────────────────────────────────────────────────────

    #[test]
    fn burst_before_frame_delivers_only_last() {
        let rig = Rig::new(100.0, 100.0);
        let _sub = rig.observe();

        for step in 1..=10 {
            let s = f64::from(step);
            rig.geometry.resize_host(&rig.host, 100.0 * s, 50.0 * s);
        }
        assert_eq!(rig.frames.pending(), 1);

        rig.frames.run_frame();
        assert_eq!(rig.seen(), vec![info(1000.0, 500.0, 1.0)]);
    }

    #[test]
    fn separate_frames_deliver_separately() {
        let rig = Rig::new(100.0, 100.0);
        let _sub = rig.observe();
        rig.frames.run_frame();

        rig.geometry.resize_host(&rig.host, 200.0, 100.0);
        rig.frames.run_frame();
        rig.geometry.resize_host(&rig.host, 300.0, 150.0);
        rig.frames.run_frame();

        assert_eq!(
            rig.seen(),
            vec![info(100.0, 100.0, 1.0), info(200.0, 100.0, 1.0), info(300.0, 150.0, 1.0)]
        );
    }

    #[test]
    fn zero_and_negative_sizes_pass_through() {
        let rig = Rig::new(100.0, 100.0);
        let _sub = rig.observe();
        rig.frames.run_frame();

        rig.geometry.resize_host(&rig.host, 0.0, -4.0);
        rig.frames.run_frame();
        assert_eq!(rig.seen().last(), Some(&info(0.0, -4.0, 1.0)));
    }

    #[test]
    fn empty_entry_batch_is_ignored() {
        let host = HostSurface::new(10.0, 10.0);
        let frames = Rc::new(ManualFrames::new());

        // Geometry source that reports an empty batch on demand.
        struct EmptyBatch {
            inner: ManualGeometry,
            observer: RefCell<Option<crate::geometry::BoxObserver>>,
        }
        impl GeometrySource for EmptyBatch {
            fn observe_box(
                &self,
                host: &HostSurface,
                callback: crate::geometry::BoxObserver,
            ) -> Option<ObserverId> {
                *self.observer.borrow_mut() = Some(callback.clone());
                self.inner.observe_box(host, callback)
            }
            fn unobserve_box(&self, id: ObserverId) {
                self.inner.unobserve_box(id)
            }
            fn add_window_listener(&self, cb: crate::geometry::WindowListener) -> ListenerId {
                self.inner.add_window_listener(cb)
            }
            fn remove_window_listener(&self, id: ListenerId) {
                self.inner.remove_window_listener(id)
            }
            fn bounding_rect(&self, host: &HostSurface) -> Rect {
                self.inner.bounding_rect(host)
            }
            fn device_pixel_ratio(&self) -> Option<f64> {
                self.inner.device_pixel_ratio()
            }
        }

        let geometry = Rc::new(EmptyBatch {
            inner: ManualGeometry::new(),
            observer: RefCell::new(None),
        });
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = observe_resize(&host, geometry.clone(), frames.clone(), move |_| {
            h.set(h.get() + 1)
        });
        frames.run_frame();

        let observer = geometry.observer.borrow().clone();
        if let Some(cb) = observer {
            cb(&[]);
        }
        assert_eq!(frames.pending(), 0);
        frames.run_frame();
        assert_eq!(hits.get(), 1);
    }

    // ── window path ───────────────────────────────────────────────────────

    #[test]
    fn window_event_redelivers_last_known_size() {
        let rig = Rig::new(100.0, 100.0);
        let _sub = rig.observe();
        rig.geometry.resize_host(&rig.host, 640.0, 480.0);
        rig.frames.run_frame();

        // Layout changes without a box observation; last known size wins.
        rig.host.set_bounding_rect(Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        rig.geometry.set_device_pixel_ratio(Some(2.0));
        rig.geometry.resize_window();
        rig.frames.run_frame();

        assert_eq!(rig.seen().last(), Some(&info(640.0, 480.0, 2.0)));
    }

    #[test]
    fn window_event_reads_layout_while_size_unknown() {
        let rig = Rig::new(0.0, 0.0);
        let sub = rig.observe();
        rig.frames.run_frame();
        assert_eq!(rig.seen(), vec![info(0.0, 0.0, 1.0)]);

        rig.host.set_bounding_rect(Some(Rect::new(0.0, 0.0, 500.0, 250.0)));
        rig.geometry.resize_window();
        rig.frames.run_frame();

        assert_eq!(rig.seen().last(), Some(&info(500.0, 250.0, 1.0)));
        assert_eq!(sub.last_known_size(), Viewport::new(500.0, 250.0));
    }

    // ── dpr ───────────────────────────────────────────────────────────────

    #[test]
    fn dpr_is_read_at_delivery_time() {
        let rig = Rig::new(100.0, 100.0);
        let _sub = rig.observe();
        rig.frames.run_frame();

        rig.geometry.resize_host(&rig.host, 200.0, 200.0);
        rig.geometry.set_device_pixel_ratio(Some(3.0));
        rig.frames.run_frame();

        assert_eq!(rig.seen().last(), Some(&info(200.0, 200.0, 3.0)));
    }

    #[test]
    fn missing_dpr_defaults_to_one() {
        let rig = Rig::new(100.0, 100.0);
        rig.geometry.set_device_pixel_ratio(None);
        let _sub = rig.observe();
        rig.frames.run_frame();

        assert_eq!(rig.seen(), vec![info(100.0, 100.0, 1.0)]);
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn teardown_cancels_pending_delivery() {
        let rig = Rig::new(100.0, 100.0);
        let sub = rig.observe();

        sub.teardown();
        assert_eq!(sub.state(), CoordinatorState::TornDown);
        assert_eq!(rig.frames.pending(), 0);

        rig.frames.run_frame();
        assert!(rig.seen().is_empty());
    }

    #[test]
    fn teardown_detaches_listeners_and_is_idempotent() {
        let rig = Rig::new(100.0, 100.0);
        let sub = rig.observe();
        assert_eq!(rig.geometry.observer_count(), 1);
        assert_eq!(rig.geometry.listener_count(), 1);

        sub.teardown();
        sub.teardown();
        assert_eq!(rig.geometry.observer_count(), 0);
        assert_eq!(rig.geometry.listener_count(), 0);

        rig.geometry.resize_host(&rig.host, 10.0, 10.0);
        rig.geometry.resize_window();
        assert_eq!(rig.frames.run_frame(), 0);
        assert!(rig.seen().is_empty());
        assert_eq!(sub.state(), CoordinatorState::TornDown);
    }

    #[test]
    fn dropping_subscription_tears_down() {
        let rig = Rig::new(100.0, 100.0);
        drop(rig.observe());

        assert_eq!(rig.geometry.observer_count(), 0);
        assert_eq!(rig.geometry.listener_count(), 0);
        assert_eq!(rig.frames.run_frame(), 0);
        assert!(rig.seen().is_empty());
    }

    #[test]
    fn bound_handle_keeps_delivering_discarded_handle_does_not() {
        let kept = Rig::new(100.0, 100.0);
        let _sub = kept.observe();
        kept.frames.run_frame();
        kept.geometry.resize_host(&kept.host, 1600.0, 800.0);
        kept.frames.run_frame();
        assert_eq!(kept.seen(), vec![info(100.0, 100.0, 1.0), info(1600.0, 800.0, 1.0)]);

        let discarded = Rig::new(100.0, 100.0);
        let _ = discarded.observe();
        discarded.frames.run_frame();
        discarded.geometry.resize_host(&discarded.host, 1600.0, 800.0);
        discarded.frames.run_frame();
        assert!(discarded.seen().is_empty());
        assert_eq!(discarded.geometry.observer_count(), 0);
        assert_eq!(discarded.geometry.listener_count(), 0);
    }

    #[test]
    fn teardown_from_inside_callback_stops_later_deliveries() {
        let rig = Rig::new(100.0, 100.0);
        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let (h, slot) = (Rc::clone(&hits), Rc::clone(&holder));
        let sub = observe_resize(&rig.host, rig.geometry.clone(), rig.frames.clone(), move |_| {
            h.set(h.get() + 1);
            if let Some(sub) = slot.borrow().as_ref() {
                sub.teardown();
            }
        });
        *holder.borrow_mut() = Some(sub);

        rig.frames.run_frame();
        rig.geometry.resize_host(&rig.host, 50.0, 50.0);
        rig.frames.run_frame();

        assert_eq!(hits.get(), 1);
        assert_eq!(rig.geometry.observer_count(), 0);
    }

    #[test]
    fn coordinators_on_one_geometry_are_independent() {
        let rig = Rig::new(100.0, 100.0);
        let other_host = HostSurface::new(300.0, 300.0);
        let other_seen = Rc::new(RefCell::new(Vec::new()));

        let first = rig.observe();
        let s = Rc::clone(&other_seen);
        let _second = observe_resize(
            &other_host,
            rig.geometry.clone(),
            rig.frames.clone(),
            move |info| s.borrow_mut().push(info),
        );
        rig.frames.run_frame();

        first.teardown();
        rig.geometry.resize_host(&other_host, 400.0, 400.0);
        rig.frames.run_frame();

        assert_eq!(rig.seen(), vec![info(100.0, 100.0, 1.0)]);
        assert_eq!(
            *other_seen.borrow(),
            vec![info(300.0, 300.0, 1.0), info(400.0, 400.0, 1.0)]
        );
    }
}
