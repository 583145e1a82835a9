//! Browser implementation of the DOM boundary (web-sys).

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{Element, Page};
use crate::cookies::CookieSource;

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Handle to a live DOM element
#[derive(Clone, Debug, PartialEq)]
pub struct WebElement(pub web_sys::Element);

impl Element for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn is_disabled(&self) -> bool {
        self.0.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.0.dyn_ref::<web_sys::HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn append_child(&self, tag: &str) -> Option<Self> {
        let child = self.0.owner_document()?.create_element(tag).ok()?;
        self.0.append_child(&child).ok()?;
        Some(WebElement(child))
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
            handler();
        });
        let _ = self.0.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

/// The window's current document
#[derive(Clone, Copy, Debug, Default)]
pub struct WebPage;

impl Page for WebPage {
    type Element = WebElement;

    fn query(&self, selector: &str) -> Option<WebElement> {
        document()?.query_selector(selector).ok().flatten().map(WebElement)
    }

    fn query_all(&self, selector: &str) -> Vec<WebElement> {
        let Some(list) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn by_id(&self, id: &str) -> Option<WebElement> {
        document()?.get_element_by_id(id).map(WebElement)
    }

    fn append_to_body(&self, tag: &str) -> Option<WebElement> {
        let doc = document()?;
        let el = doc.create_element(tag).ok()?;
        doc.body()?.append_child(&el).ok()?;
        Some(WebElement(el))
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = document().and_then(|doc| doc.document_element()) {
            let _ = root.set_attribute(name, value);
        }
    }

    fn reload(&self) {
        if let Some(win) = web_sys::window() {
            let _ = win.location().reload();
        }
    }
}

impl CookieSource for WebPage {
    fn cookie_string(&self) -> String {
        document()
            .and_then(|doc| doc.dyn_into::<web_sys::HtmlDocument>().ok())
            .and_then(|doc| doc.cookie().ok())
            .unwrap_or_default()
    }
}
