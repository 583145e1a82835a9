//! Test doubles for the DOM, storage, network and timer boundaries.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use crate::client::{HttpRequest, HttpResponse, HttpTransport, RequestClient};
use crate::config::UiConfig;
use crate::cookies::CookieSource;
use crate::coordinator::StatusUpdateCoordinator;
use crate::dom::{Element, Page};
use crate::error::RequestError;
use crate::notify::NotificationPresenter;
use crate::scheduler::Scheduler;
use crate::storage::KeyValueStore;

// ========================
// DOM
// ========================

#[derive(Default)]
struct NodeState {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    styles: BTreeMap<String, String>,
    children: Vec<FakeElement>,
    on_click: Option<Rc<dyn Fn()>>,
    connected: bool,
    removals: u32,
    disabled_history: Vec<bool>,
}

impl NodeState {
    fn classes(&self) -> Vec<&str> {
        self.attributes.get("class").map(|c| c.split_whitespace().collect()).unwrap_or_default()
    }
}

#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<NodeState>>);

impl FakeElement {
    fn new(tag: &str, attributes: &[(&str, &str)]) -> Self {
        let el = FakeElement::default();
        {
            let mut node = el.0.borrow_mut();
            node.tag = tag.to_string();
            node.connected = true;
            for (name, value) in attributes {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
        el
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn children(&self) -> Vec<FakeElement> {
        self.0.borrow().children.clone()
    }

    /// Fire the registered click handler, if any
    pub fn click(&self) {
        let handler = self.0.borrow().on_click.clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// How many times `remove` actually detached the node
    pub fn removals(&self) -> u32 {
        self.0.borrow().removals
    }

    /// Every `set_disabled` call in order
    pub fn disabled_history(&self) -> Vec<bool> {
        self.0.borrow().disabled_history.clone()
    }

    fn matches(&self, selector: &str) -> bool {
        let node = self.0.borrow();
        let selector = selector.trim();
        let tag_len = selector
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(selector.len());
        let (tag, mut rest) = selector.split_at(tag_len);
        if !tag.is_empty() && tag != node.tag {
            return false;
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = body
                        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                        .unwrap_or(body.len());
                    let ident = &body[..end];
                    let ok = if first == '.' {
                        node.classes().contains(&ident)
                    } else {
                        node.attributes.get("id").map(String::as_str) == Some(ident)
                    };
                    if !ok {
                        return false;
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let Some(close) = rest.find(']') else { return false };
                    let inner = &rest[1..close];
                    let ok = match inner.split_once('=') {
                        Some((name, value)) => {
                            node.attributes.get(name).map(String::as_str) == Some(value.trim_matches('"'))
                        }
                        None => node.attributes.contains_key(inner),
                    };
                    if !ok {
                        return false;
                    }
                    rest = &rest[close + 1..];
                }
                _ => return false,
            }
        }
        true
    }
}

impl Element for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
    }

    fn text(&self) -> String {
        let node = self.0.borrow();
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&child.text());
        }
        text
    }

    fn set_text(&self, text: &str) {
        let mut node = self.0.borrow_mut();
        node.text = text.to_string();
        node.children.clear();
    }

    fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().inner_html = html.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.0.borrow().attributes.contains_key("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        let mut node = self.0.borrow_mut();
        node.disabled_history.push(disabled);
        if disabled {
            node.attributes.insert("disabled".into(), String::new());
        } else {
            node.attributes.remove("disabled");
        }
    }

    fn add_class(&self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut node = self.0.borrow_mut();
        let classes = node.attributes.entry("class".into()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
    }

    fn remove_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        let remaining: Vec<String> = node.classes().into_iter().filter(|c| *c != class).map(str::to_owned).collect();
        node.attributes.insert("class".into(), remaining.join(" "));
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes().contains(&class)
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0.borrow_mut().styles.insert(property.to_string(), value.to_string());
    }

    fn append_child(&self, tag: &str) -> Option<Self> {
        let child = FakeElement::new(tag, &[]);
        self.0.borrow_mut().children.push(child.clone());
        Some(child)
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        self.0.borrow_mut().on_click = Some(Rc::from(handler));
    }

    fn remove(&self) {
        let mut node = self.0.borrow_mut();
        if node.connected {
            node.connected = false;
            node.removals += 1;
        }
    }

    fn is_connected(&self) -> bool {
        self.0.borrow().connected
    }
}

#[derive(Default)]
struct PageState {
    nodes: RefCell<Vec<FakeElement>>,
    root_attributes: RefCell<BTreeMap<String, String>>,
    reloads: Cell<u32>,
    cookies: RefCell<String>,
    has_body: Cell<bool>,
}

/// Flat in-memory document. Selectors support `tag`, `.class`, `#id`,
/// `[attr]` and `[attr="value"]` in any compound.
#[derive(Clone)]
pub struct FakePage(Rc<PageState>);

impl Default for FakePage {
    fn default() -> Self {
        let state = PageState::default();
        state.has_body.set(true);
        FakePage(Rc::new(state))
    }
}

impl FakePage {
    pub fn add(&self, tag: &str, attributes: &[(&str, &str)]) -> FakeElement {
        let el = FakeElement::new(tag, attributes);
        self.0.nodes.borrow_mut().push(el.clone());
        el
    }

    pub fn reloads(&self) -> u32 {
        self.0.reloads.get()
    }

    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.0.root_attributes.borrow().get(name).cloned()
    }

    pub fn set_cookies(&self, cookies: &str) {
        *self.0.cookies.borrow_mut() = cookies.to_string();
    }

    pub fn without_body(&self) {
        self.0.has_body.set(false);
    }
}

impl Page for FakePage {
    type Element = FakeElement;

    fn query(&self, selector: &str) -> Option<FakeElement> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        self.0
            .nodes
            .borrow()
            .iter()
            .filter(|el| el.is_connected() && el.matches(selector))
            .cloned()
            .collect()
    }

    fn append_to_body(&self, tag: &str) -> Option<FakeElement> {
        if !self.0.has_body.get() {
            return None;
        }
        Some(self.add(tag, &[]))
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.0.root_attributes.borrow_mut().insert(name.to_string(), value.to_string());
    }

    fn reload(&self) {
        self.0.reloads.set(self.0.reloads.get() + 1);
    }
}

impl CookieSource for FakePage {
    fn cookie_string(&self) -> String {
        self.0.cookies.borrow().clone()
    }
}

pub struct StaticCookies(pub String);

impl CookieSource for StaticCookies {
    fn cookie_string(&self) -> String {
        self.0.clone()
    }
}

// ========================
// Storage
// ========================

#[derive(Clone, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

// ========================
// Network
// ========================

/// Replays queued responses in order and records every request
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, RequestError>>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn fail(&self, reason: &str) {
        self.responses.borrow_mut().push_back(Err(RequestError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        self.requests.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        next.unwrap_or_else(|| Err(RequestError::Network("no scripted response".into())))
    }
}

// ========================
// Timers
// ========================

#[derive(Default)]
struct SchedulerState {
    now: Cell<f64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<(f64, u64, Box<dyn FnOnce()>)>>,
}

/// Virtual clock starting at 0; tasks run only inside [`ManualScheduler::advance`]
#[derive(Clone, Default)]
pub struct ManualScheduler(Rc<SchedulerState>);

impl ManualScheduler {
    /// Move the clock forward, running due tasks in deadline order
    pub fn advance(&self, ms: u32) {
        let target = self.0.now.get() + f64::from(ms);
        loop {
            let next = {
                let mut queue = self.0.queue.borrow_mut();
                let due = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by(|(_, a), (_, b)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                    .map(|(i, _)| i);
                due.map(|i| queue.remove(i))
            };
            match next {
                Some((at, _, task)) => {
                    self.0.now.set(at);
                    task();
                }
                None => break,
            }
        }
        self.0.now.set(target);
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.0.now.get()
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let seq = self.0.seq.get();
        self.0.seq.set(seq + 1);
        let at = self.0.now.get() + f64::from(delay_ms);
        self.0.queue.borrow_mut().push((at, seq, task));
    }
}

// ========================
// Wiring
// ========================

/// A coordinator wired to fakes, with the CSRF cookie already set
pub struct Harness {
    pub page: FakePage,
    pub transport: ScriptedTransport,
    pub scheduler: ManualScheduler,
    pub storage: MemoryStore,
    pub config: Rc<UiConfig>,
    pub coordinator: StatusUpdateCoordinator<FakePage>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        let page = FakePage::default();
        page.set_cookies("sessionid=abc; csrftoken=token");
        let transport = ScriptedTransport::default();
        let scheduler = ManualScheduler::default();
        let config = Rc::new(config);

        let shared_scheduler: Rc<dyn Scheduler> = Rc::new(scheduler.clone());
        let client = RequestClient::new(Rc::new(transport.clone()), Rc::new(page.clone()), config.clone());
        let notifier = NotificationPresenter::new(page.clone(), shared_scheduler.clone(), config.fade_ms);
        let coordinator =
            StatusUpdateCoordinator::new(page.clone(), client, notifier, shared_scheduler, config.clone());

        Self { page, transport, scheduler, storage: MemoryStore::default(), config, coordinator }
    }
}
