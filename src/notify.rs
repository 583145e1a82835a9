//! Notification Presenter
//!
//! Transient, dismissible alerts pinned to the top-right corner. Each call to
//! [`NotificationPresenter::show`] creates an independent alert with its own
//! timers; there is no queue and no cap.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{Element, Page};
use crate::models::NotificationKind;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// When the fade starts (ms since epoch)
    pub expires_at: f64,
}

/// Handle for early dismissal of one alert
#[derive(Clone)]
pub struct NotificationHandle<E: Element> {
    notification: Rc<Notification>,
    element: E,
    dismissed: Rc<Cell<bool>>,
}

impl<E: Element> NotificationHandle<E> {
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed.get()
    }

    /// Remove immediately. Pending auto-dismiss steps become no-ops.
    pub fn dismiss(&self) {
        if !self.dismissed.replace(true) {
            self.element.remove();
        }
    }

    fn begin_fade(&self) {
        if !self.is_dismissed() {
            self.element.remove_class("show");
        }
    }
}

#[derive(Clone)]
pub struct NotificationPresenter<P: Page> {
    page: P,
    scheduler: Rc<dyn Scheduler>,
    fade_ms: u32,
    next_id: Rc<Cell<u64>>,
}

impl<P: Page> NotificationPresenter<P> {
    pub fn new(page: P, scheduler: Rc<dyn Scheduler>, fade_ms: u32) -> Self {
        Self { page, scheduler, fade_ms, next_id: Rc::new(Cell::new(1)) }
    }

    /// Show `message` for `duration_ms`, then fade and remove it.
    ///
    /// Returns `None` when the document has no body to attach to.
    pub fn show(&self, kind: NotificationKind, message: &str, duration_ms: u32) -> Option<NotificationHandle<P::Element>> {
        let Some(alert) = self.page.append_to_body("div") else {
            log::warn!("no document body, dropping {:?} notification: {}", kind, message);
            return None;
        };
        alert.set_attribute(
            "class",
            &format!("alert alert-{} alert-dismissible fade show position-fixed top-0 end-0 m-3", kind.css_suffix()),
        );
        alert.set_attribute("role", "alert");
        alert.set_style("z-index", "1050");

        // Plain text: messages can come straight from the server.
        if let Some(body) = alert.append_child("span") {
            body.set_text(message);
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let handle = NotificationHandle {
            notification: Rc::new(Notification {
                id,
                kind,
                message: message.to_string(),
                expires_at: self.scheduler.now_ms() + f64::from(duration_ms),
            }),
            element: alert.clone(),
            dismissed: Rc::new(Cell::new(false)),
        };

        if let Some(close) = alert.append_child("button") {
            close.set_attribute("type", "button");
            close.set_attribute("class", "btn-close");
            close.set_attribute("aria-label", "Close");
            let on_close = handle.clone();
            close.on_click(Box::new(move || on_close.dismiss()));
        }

        let fading = handle.clone();
        let scheduler = self.scheduler.clone();
        let fade_ms = self.fade_ms;
        self.scheduler.schedule(
            duration_ms,
            Box::new(move || {
                fading.begin_fade();
                scheduler.schedule(fade_ms, Box::new(move || fading.dismiss()));
            }),
        );

        Some(handle)
    }
}
