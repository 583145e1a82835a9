//! DOM Boundary
//!
//! Everything that touches the document goes through [`Page`] and
//! [`Element`], so managers can be driven against an in-memory page in tests.

mod web;

pub use web::{WebElement, WebPage};

/// A single node in the document.
///
/// Handles are cheap to clone and refer to the same node.
pub trait Element: Clone + 'static {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    /// `textContent`
    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);

    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);

    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn set_style(&self, property: &str, value: &str);

    /// Create a `tag` element and append it as the last child
    fn append_child(&self, tag: &str) -> Option<Self>;

    fn on_click(&self, handler: Box<dyn Fn()>);

    /// Detach from the document. Removing twice is a no-op.
    fn remove(&self);
    fn is_connected(&self) -> bool;
}

/// The current document plus page-level navigation.
pub trait Page: Clone + 'static {
    type Element: Element;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn by_id(&self, id: &str) -> Option<Self::Element> {
        self.query(&format!("#{}", id))
    }

    /// Create a `tag` element at the end of `<body>`
    fn append_to_body(&self, tag: &str) -> Option<Self::Element>;

    /// Set an attribute on `<html>`
    fn set_root_attribute(&self, name: &str, value: &str);

    fn reload(&self);
}
