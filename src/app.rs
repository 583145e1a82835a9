//! Page Bootstrap
//!
//! Wires the managers to the server-rendered page: restores local state,
//! binds action buttons and mounts the Leptos widgets.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use log::LevelFilter;
use wasm_bindgen::JsCast;

use crate::active_repair::{self, ActiveRepairManager};
use crate::client::RequestClient;
use crate::components::{ReleaseRepairButton, ThemeToggle};
use crate::config::UiConfig;
use crate::coordinator::StatusUpdateCoordinator;
use crate::dom::{Element, Page, WebPage};
use crate::fetch::FetchTransport;
use crate::logger;
use crate::models::{Item, ItemId, ItemStatus};
use crate::notify::NotificationPresenter;
use crate::progress;
use crate::scheduler::{BrowserScheduler, Scheduler};
use crate::storage::{BrowserStorage, KeyValueStore};
use crate::theme::ThemeManager;

/// Task transition buttons: `data-task-id` + `data-task-status`
pub const TASK_BUTTON_SELECTOR: &str = "button[data-task-status]";
/// Repair claim buttons: `data-repair-id`, optional `data-vehicle` / `data-client`
pub const CLAIM_BUTTON_SELECTOR: &str = "button[data-claim-repair]";
/// Placeholder for the theme toggle widget
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

/// Shortest accepted refresh period for the active repair panel
pub const MIN_REFRESH_MS: u32 = 1_000;

/// Runs a click handler's future to completion in the background
pub type Spawner = Rc<dyn Fn(Pin<Box<dyn Future<Output = ()>>>)>;

pub fn start() {
    logger::init(LevelFilter::Info);

    let page = WebPage;
    let config = Rc::new(UiConfig::load(&page));
    log::set_max_level(config.log_level());

    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);
    let client = RequestClient::new(Rc::new(FetchTransport), Rc::new(page), config.clone());
    let notifier = NotificationPresenter::new(page, scheduler.clone(), config.fade_ms);
    let coordinator = StatusUpdateCoordinator::new(page, client, notifier, scheduler.clone(), config.clone());

    let theme = ThemeManager::new(page, BrowserStorage, config.theme_key.clone()).apply_saved();

    let repairs = ActiveRepairManager::new(page, BrowserStorage, scheduler, config.clone());
    repairs.restore();
    if let Some(period) = refresh_period(config.active_repair_refresh_ms) {
        let ticking = repairs.clone();
        Interval::new(period, move || ticking.refresh_elapsed()).forget();
    }

    let bars = progress::apply_bands(&page);

    let spawn: Spawner = Rc::new(|fut: Pin<Box<dyn Future<Output = ()>>>| wasm_bindgen_futures::spawn_local(fut));
    let tasks = bind_task_buttons(&page, &coordinator, &spawn);
    let claims = bind_claim_buttons(&page, &coordinator, &repairs, &spawn);

    let theme_key = config.theme_key.clone();
    mount_into(THEME_TOGGLE_ID, move || view! { <ThemeToggle storage_key=theme_key /> });
    mount_into(active_repair::CLEAR_ID, move || {
        let release = StoredValue::new_local(repairs);
        view! {
            <ReleaseRepairButton on_confirm=Callback::new(move |_| release.with_value(|r| r.clear())) />
        }
    });

    log::info!(
        "ready: theme={}, {} task buttons, {} claim buttons, {} progress bars",
        theme.as_str(),
        tasks,
        claims,
        bars
    );
}

/// `0` turns the elapsed-time refresh off; anything else is at least [`MIN_REFRESH_MS`]
fn refresh_period(configured_ms: u32) -> Option<u32> {
    (configured_ms > 0).then(|| configured_ms.max(MIN_REFRESH_MS))
}

fn task_trigger<E: Element>(button: &E) -> Option<(ItemId, ItemStatus)> {
    let item = Item::from_dataset(button, "data-task-id")?;
    let status = button.attribute("data-task-status").as_deref().and_then(ItemStatus::from_slug)?;
    Some((item.id, status))
}

/// Bind every task button to a status transition. Returns how many were bound.
pub fn bind_task_buttons<P: Page>(page: &P, coordinator: &StatusUpdateCoordinator<P>, spawn: &Spawner) -> usize {
    let mut bound = 0;
    for button in page.query_all(TASK_BUTTON_SELECTOR) {
        let Some((id, status)) = task_trigger(&button) else {
            log::warn!("task button without data-task-id/data-task-status, skipping");
            continue;
        };
        let coordinator = coordinator.clone();
        let spawn = spawn.clone();
        let control = button.clone();
        button.on_click(Box::new(move || {
            let coordinator = coordinator.clone();
            let control = control.clone();
            let id = id.clone();
            let status = status.clone();
            spawn(Box::pin(async move {
                coordinator.transition(&id, status, &control).await;
            }));
        }));
        bound += 1;
    }
    bound
}

/// Bind every claim button to [`ActiveRepairManager::claim`]. Returns how many were bound.
pub fn bind_claim_buttons<P: Page, S: KeyValueStore>(
    page: &P,
    coordinator: &StatusUpdateCoordinator<P>,
    repairs: &ActiveRepairManager<P, S>,
    spawn: &Spawner,
) -> usize {
    let mut bound = 0;
    for button in page.query_all(CLAIM_BUTTON_SELECTOR) {
        let Some(repair) = Item::from_dataset(&button, "data-repair-id") else {
            log::warn!("claim button without data-repair-id, skipping");
            continue;
        };
        let coordinator = coordinator.clone();
        let repairs = repairs.clone();
        let spawn = spawn.clone();
        let control = button.clone();
        button.on_click(Box::new(move || {
            let coordinator = coordinator.clone();
            let repairs = repairs.clone();
            let control = control.clone();
            let repair = repair.clone();
            spawn(Box::pin(async move {
                repairs.claim(&coordinator, &repair, &control).await;
            }));
        }));
        bound += 1;
    }
    bound
}

/// Mount a Leptos view into the element with `id`, if the page has one
fn mount_into<F, N>(id: &str, view: F)
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    let container = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    match container {
        Some(container) => leptos::mount::mount_to(container, view).forget(),
        None => log::debug!("no #{} on this page", id),
    }
}
