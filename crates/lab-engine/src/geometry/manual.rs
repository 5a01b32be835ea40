use std::cell::{Cell, RefCell};

use crate::coords::{Rect, Viewport};
use crate::host::HostSurface;

use super::{BoxEntry, BoxObserver, GeometrySource, ListenerId, ObserverId, WindowListener};

/// Geometry source whose layout changes are performed by the caller.
///
/// `resize_host` lays out a host at a new content size and fires the box
/// observers attached to it; `resize_window` fires window listeners.
pub struct ManualGeometry {
    next_id: Cell<u64>,
    observers: RefCell<Vec<(ObserverId, HostSurface, BoxObserver)>>,
    listeners: RefCell<Vec<(ListenerId, WindowListener)>>,
    dpr: Cell<Option<f64>>,
    box_observation: Cell<bool>,
}

impl Default for ManualGeometry {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            observers: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            dpr: Cell::new(Some(1.0)),
            box_observation: Cell::new(true),
        }
    }
}

impl ManualGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles support for box observation. When disabled, `observe_box`
    /// returns `None`, like a platform without the capability.
    pub fn set_box_observation(&self, supported: bool) {
        self.box_observation.set(supported);
    }

    pub fn set_device_pixel_ratio(&self, dpr: Option<f64>) {
        self.dpr.set(dpr);
    }

    /// Lays out `host` at a new content size and notifies its box observers.
    pub fn resize_host(&self, host: &HostSurface, width: f64, height: f64) {
        host.set_content_size(Viewport::new(width, height));

        let targets: Vec<BoxObserver> = self
            .observers
            .borrow()
            .iter()
            .filter(|(_, h, _)| h.same_host(host))
            .map(|(_, _, cb)| cb.clone())
            .collect();

        let batch = [BoxEntry { content: host.content_size() }];
        for cb in targets {
            cb(&batch);
        }
    }

    /// Fires window-level resize listeners.
    pub fn resize_window(&self) {
        let targets: Vec<WindowListener> =
            self.listeners.borrow().iter().map(|(_, cb)| cb.clone()).collect();
        for cb in targets {
            cb();
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        id
    }
}

impl GeometrySource for ManualGeometry {
    fn observe_box(&self, host: &HostSurface, callback: BoxObserver) -> Option<ObserverId> {
        if !self.box_observation.get() {
            return None;
        }
        let id = ObserverId(self.next_id());
        self.observers.borrow_mut().push((id, host.clone(), callback));
        Some(id)
    }

    fn unobserve_box(&self, id: ObserverId) {
        self.observers.borrow_mut().retain(|(i, _, _)| *i != id);
    }

    fn add_window_listener(&self, callback: WindowListener) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.borrow_mut().push((id, callback));
        id
    }

    fn remove_window_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }

    fn bounding_rect(&self, host: &HostSurface) -> Rect {
        host.bounding_rect()
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.dpr.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn resize_host_only_notifies_that_host() {
        let geo = ManualGeometry::new();
        let a = HostSurface::new(1.0, 1.0);
        let b = HostSurface::new(1.0, 1.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = Rc::clone(&seen);
        geo.observe_box(&a, Rc::new(move |entries: &[BoxEntry]| {
            s.borrow_mut().extend_from_slice(entries)
        }));

        geo.resize_host(&b, 50.0, 50.0);
        assert!(seen.borrow().is_empty());

        geo.resize_host(&a, 300.0, 200.0);
        assert_eq!(seen.borrow().as_slice(), &[BoxEntry { content: Viewport::new(300.0, 200.0) }]);
        assert_eq!(a.content_size(), Viewport::new(300.0, 200.0));
    }

    #[test]
    fn observer_may_detach_itself_while_running() {
        let geo = Rc::new(ManualGeometry::new());
        let host = HostSurface::new(1.0, 1.0);
        let id = Rc::new(Cell::new(None));

        let (g, i) = (Rc::clone(&geo), Rc::clone(&id));
        id.set(geo.observe_box(&host, Rc::new(move |_: &[BoxEntry]| {
            if let Some(id) = i.get() {
                g.unobserve_box(id);
            }
        })));

        geo.resize_host(&host, 2.0, 2.0);
        assert_eq!(geo.observer_count(), 0);
    }

    #[test]
    fn unsupported_box_observation_returns_none() {
        let geo = ManualGeometry::new();
        geo.set_box_observation(false);
        let host = HostSurface::new(1.0, 1.0);
        assert!(geo.observe_box(&host, Rc::new(|_: &[BoxEntry]| {})).is_none());
        assert_eq!(geo.observer_count(), 0);
    }

    #[test]
    fn window_listeners_fire_until_removed() {
        let geo = ManualGeometry::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let id = geo.add_window_listener(Rc::new(move || h.set(h.get() + 1)));
        geo.resize_window();
        geo.remove_window_listener(id);
        geo.resize_window();

        assert_eq!(hits.get(), 1);
        assert_eq!(geo.listener_count(), 0);
    }
}
