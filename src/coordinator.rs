//! Status Update Coordinator
//!
//! Runs one state-changing action end to end:
//!
//! 1. disable the triggering control and show a spinner in it
//! 2. send the request
//! 3. on success animate the card out, update counters, notify and schedule
//!    a reload; on failure show the error
//! 4. always give the control back its original content
//!
//! The control is passed in by the caller and the disabled state is the only
//! re-entrancy guard.

use std::rc::Rc;

use crate::client::RequestClient;
use crate::commands;
use crate::config::UiConfig;
use crate::dom::{Element, Page};
use crate::error::RequestError;
use crate::models::{ActionResponse, ItemId, ItemStatus, NotificationKind};
use crate::notify::NotificationPresenter;
use crate::scheduler::Scheduler;

/// Markup shown inside a control while its request is in flight
pub const SPINNER_HTML: &str = r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    TaskStatus(ItemStatus),
    ClaimRepair,
}

impl ActionKind {
    fn card_selector(&self, id: &ItemId) -> String {
        match self {
            ActionKind::TaskStatus(_) => format!(r#".task-item[data-task-id="{}"]"#, id),
            ActionKind::ClaimRepair => format!(r#".repair-item[data-repair-id="{}"]"#, id),
        }
    }

    fn counter_selector(&self) -> &'static str {
        match self {
            ActionKind::TaskStatus(_) => ".task-count",
            ActionKind::ClaimRepair => ".repair-count",
        }
    }
}

/// One in-flight action, alive until its request settles
#[derive(Debug, Clone)]
pub struct PendingAction<E> {
    pub item_id: ItemId,
    pub kind: ActionKind,
    pub control: E,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied(ActionResponse),
    Failed(RequestError),
    /// The control was already busy; nothing was sent
    Skipped,
}

/// Disables a control for its lifetime and restores it on drop. On native
/// targets that includes unwinding out of the success/failure handling; wasm32
/// builds abort on panic, so there the guard only covers the normal exits.
struct BusyGuard<E: Element> {
    control: E,
    original: String,
}

impl<E: Element> BusyGuard<E> {
    fn engage(control: &E) -> Self {
        let original = control.inner_html();
        control.set_disabled(true);
        control.set_inner_html(SPINNER_HTML);
        Self { control: control.clone(), original }
    }
}

impl<E: Element> Drop for BusyGuard<E> {
    fn drop(&mut self) {
        self.control.set_disabled(false);
        self.control.set_inner_html(&self.original);
    }
}

#[derive(Clone)]
pub struct StatusUpdateCoordinator<P: Page> {
    page: P,
    client: RequestClient,
    notifier: NotificationPresenter<P>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<UiConfig>,
}

impl<P: Page> StatusUpdateCoordinator<P> {
    pub fn new(
        page: P,
        client: RequestClient,
        notifier: NotificationPresenter<P>,
        scheduler: Rc<dyn Scheduler>,
        config: Rc<UiConfig>,
    ) -> Self {
        Self { page, client, notifier, scheduler, config }
    }

    /// Move task `item_id` to `target`, driven by `control`
    pub async fn transition(&self, item_id: &ItemId, target: ItemStatus, control: &P::Element) -> Outcome {
        self.run(PendingAction {
            item_id: item_id.clone(),
            kind: ActionKind::TaskStatus(target),
            control: control.clone(),
        })
        .await
    }

    /// Claim repair `item_id`, driven by `control`
    pub async fn claim_repair(&self, item_id: &ItemId, control: &P::Element) -> Outcome {
        self.run(PendingAction {
            item_id: item_id.clone(),
            kind: ActionKind::ClaimRepair,
            control: control.clone(),
        })
        .await
    }

    pub async fn run(&self, action: PendingAction<P::Element>) -> Outcome {
        if action.control.is_disabled() {
            log::debug!("control for {} is busy, ignoring trigger", action.item_id);
            return Outcome::Skipped;
        }
        let _busy = BusyGuard::engage(&action.control);

        let result = match &action.kind {
            ActionKind::TaskStatus(status) => {
                commands::change_task_status(&self.client, &self.config, &action.item_id, status).await
            }
            ActionKind::ClaimRepair => commands::claim_repair(&self.client, &self.config, &action.item_id).await,
        };

        match result {
            Ok(response) => {
                log::info!("{:?} applied to {}", action.kind, action.item_id);
                self.on_success(&action, &response);
                Outcome::Applied(response)
            }
            Err(err) => {
                log::warn!("{:?} failed for {}: {}", action.kind, action.item_id, err);
                self.on_failure(&action, &err);
                Outcome::Failed(err)
            }
        }
    }

    fn on_success(&self, action: &PendingAction<P::Element>, response: &ActionResponse) {
        self.remove_card(action);

        let default_text = match action.kind {
            ActionKind::TaskStatus(_) => &self.config.messages.task_updated,
            ActionKind::ClaimRepair => &self.config.messages.repair_claimed,
        };
        let text = response.message.as_deref().unwrap_or(default_text);
        self.notifier.show(NotificationKind::Success, text, self.config.notification_ms);

        if let Some(delay) = self.config.reload_delay_ms {
            let page = self.page.clone();
            self.scheduler.schedule(delay, Box::new(move || page.reload()));
        }
    }

    fn on_failure(&self, action: &PendingAction<P::Element>, err: &RequestError) {
        let fallback = match action.kind {
            ActionKind::TaskStatus(_) => &self.config.messages.update_failed,
            ActionKind::ClaimRepair => &self.config.messages.claim_failed,
        };
        self.notifier.show(NotificationKind::Danger, err.user_message(fallback), self.config.notification_ms);
    }

    /// Fade the card out, then detach it and decrement the counters
    fn remove_card(&self, action: &PendingAction<P::Element>) {
        let selector = action.kind.card_selector(&action.item_id);
        let Some(card) = self.page.query(&selector) else {
            log::debug!("no card matches {}", selector);
            return;
        };

        let seconds = f64::from(self.config.removal_ms) / 1000.0;
        card.set_style("transition", &format!("opacity {0}s ease, transform {0}s ease", seconds));
        card.set_style("opacity", "0");
        card.set_style("transform", "translateX(20px)");

        let page = self.page.clone();
        let counters = action.kind.counter_selector();
        self.scheduler.schedule(
            self.config.removal_ms,
            Box::new(move || {
                card.remove();
                decrement_counters(&page, counters);
            }),
        );
    }
}

/// Decrement every numeric counter matching `selector`, never below zero
fn decrement_counters<P: Page>(page: &P, selector: &str) {
    for counter in page.query_all(selector) {
        if let Ok(count) = counter.text().trim().parse::<u32>() {
            counter.set_text(&count.saturating_sub(1).to_string());
        }
    }
}
