use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::markup;

struct Element {
    name: String,
    /// Insertion-ordered; `set_attr` on an existing key replaces in place.
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<SvgNode>,
}

/// Shared handle to one SVG element.
///
/// Cloning the handle does not clone the element; use [`SvgNode::ptr_eq`]
/// to compare identity.
#[derive(Clone)]
pub struct SvgNode(Rc<RefCell<Element>>);

impl SvgNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(Element {
            name: name.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        })))
    }

    /// Builder-style attribute setter for tree construction.
    pub fn with_attr(self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn set_attr(&self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let mut el = self.0.borrow_mut();
        match el.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => el.attrs.push((key.to_owned(), value)),
        }
    }

    /// Sets a numeric attribute using [`markup::format_number`].
    pub fn set_number(&self, key: &str, value: f64) {
        self.set_attr(key, markup::format_number(value));
    }

    pub fn attr(&self, key: &str) -> Option<String> {
        self.0
            .borrow()
            .attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Parses a numeric attribute; `None` if missing or not a number.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(|v| v.parse().ok())
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = Some(text.into());
    }

    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    pub fn append(&self, child: SvgNode) {
        self.0.borrow_mut().children.push(child);
    }

    pub fn children(&self) -> Vec<SvgNode> {
        self.0.borrow().children.clone()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &SvgNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Serializes this element and its subtree.
    ///
    /// An `<svg>` serialized at the top level receives the SVG namespace
    /// unless it already carries an `xmlns` attribute.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out, true);
        out
    }

    pub(crate) fn write_markup(&self, out: &mut String, outermost: bool) {
        let el = self.0.borrow();

        out.push('<');
        out.push_str(&el.name);

        if outermost && el.name == "svg" && !el.attrs.iter().any(|(k, _)| k == "xmlns") {
            markup::write_attr(out, "xmlns", super::SVG_NS);
        }
        for (k, v) in &el.attrs {
            markup::write_attr(out, k, v);
        }

        if el.text.is_none() && el.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = &el.text {
            markup::escape_into(out, text);
        }
        for child in &el.children {
            child.write_markup(out, false);
        }
        out.push_str("</");
        out.push_str(&el.name);
        out.push('>');
    }
}

impl fmt::Debug for SvgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let el = self.0.borrow();
        f.debug_struct("SvgNode")
            .field("name", &el.name)
            .field("attrs", &el.attrs.len())
            .field("children", &el.children.len())
            .finish()
    }
}
