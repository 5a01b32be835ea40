use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::coords::{Rect, Viewport};
use crate::scene::{format_number, SvgNode};

struct HostInner {
    content: Cell<Viewport>,
    /// `None` = bounding box equals the content box.
    bounding: Cell<Option<Rect>>,
    mounted: Cell<bool>,
    children: RefCell<Vec<SvgNode>>,
}

/// Container element that owns layout and hosts one engine's scene.
///
/// `HostSurface` is a cheap handle: clones share the same surface, and
/// [`HostSurface::same_host`] compares identity. The caller owns the surface;
/// engines and coordinators only hold handles and never unmount it.
#[derive(Clone)]
pub struct HostSurface {
    inner: Rc<HostInner>,
}

impl HostSurface {
    /// Creates a mounted host with the given content box size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            inner: Rc::new(HostInner {
                content: Cell::new(Viewport::new(width, height)),
                bounding: Cell::new(None),
                mounted: Cell::new(true),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Content box size in device-independent pixels.
    #[inline]
    pub fn content_size(&self) -> Viewport {
        self.inner.content.get()
    }

    /// Updates the content box.
    ///
    /// This only changes geometry; observers are notified by the geometry
    /// source that performed the layout, not by the host.
    pub fn set_content_size(&self, size: Viewport) {
        self.inner.content.set(size);
    }

    /// Border-box geometry as a direct layout read would report it.
    pub fn bounding_rect(&self) -> Rect {
        self.inner
            .bounding
            .get()
            .unwrap_or_else(|| Rect::from_size(self.content_size()))
    }

    /// Overrides the bounding box (e.g. to model padding or borders).
    /// `None` restores the content-box default.
    pub fn set_bounding_rect(&self, rect: Option<Rect>) {
        self.inner.bounding.set(rect);
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    pub fn unmount(&self) {
        self.inner.mounted.set(false);
    }

    pub fn append(&self, node: SvgNode) {
        self.inner.children.borrow_mut().push(node);
    }

    /// Detaches `node` if it is a direct child. Returns whether it was found.
    pub fn remove(&self, node: &SvgNode) -> bool {
        let mut children = self.inner.children.borrow_mut();
        match children.iter().position(|c| c.ptr_eq(node)) {
            Some(idx) => {
                children.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn children(&self) -> Vec<SvgNode> {
        self.inner.children.borrow().clone()
    }

    #[inline]
    pub fn same_host(&self, other: &HostSurface) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Serializes the hosted scene as a standalone SVG document sized to the
    /// content box (clamped to 1x1 so the document stays renderable).
    pub fn to_markup(&self) -> String {
        let size = self.content_size().clamped(1.0);
        let (w, h) = (format_number(size.width), format_number(size.height));

        let root = SvgNode::new("svg")
            .with_attr("width", w.clone())
            .with_attr("height", h.clone())
            .with_attr("viewBox", format!("0 0 {w} {h}"));
        for child in self.inner.children.borrow().iter() {
            root.append(child.clone());
        }
        root.to_markup()
    }
}

impl fmt::Debug for HostSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSurface")
            .field("content", &self.content_size())
            .field("mounted", &self.is_mounted())
            .field("children", &self.inner.children.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_rect_defaults_to_content_box() {
        let host = HostSurface::new(640.0, 360.0);
        assert_eq!(host.bounding_rect(), Rect::new(0.0, 0.0, 640.0, 360.0));

        host.set_bounding_rect(Some(Rect::new(8.0, 8.0, 656.0, 376.0)));
        assert_eq!(host.bounding_rect().size.width, 656.0);

        host.set_bounding_rect(None);
        host.set_content_size(Viewport::new(10.0, 20.0));
        assert_eq!(host.bounding_rect(), Rect::new(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn remove_only_detaches_matching_child() {
        let host = HostSurface::new(1.0, 1.0);
        let a = SvgNode::new("g");
        let b = SvgNode::new("g");
        host.append(a.clone());
        host.append(b.clone());

        assert!(host.remove(&a));
        assert!(!host.remove(&a));
        assert_eq!(host.children().len(), 1);
        assert!(host.children()[0].ptr_eq(&b));
    }

    #[test]
    fn clones_are_the_same_host() {
        let host = HostSurface::new(1.0, 1.0);
        let other = host.clone();
        other.set_content_size(Viewport::new(5.0, 6.0));
        assert!(host.same_host(&other));
        assert_eq!(host.content_size(), Viewport::new(5.0, 6.0));
        assert!(!host.same_host(&HostSurface::new(5.0, 6.0)));
    }

    #[test]
    fn empty_host_markup_is_clamped_document() {
        let host = HostSurface::new(0.0, 0.0);
        assert_eq!(
            host.to_markup(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1" viewBox="0 0 1 1"/>"#
        );
    }
}
