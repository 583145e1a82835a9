//! Active Repair
//!
//! The repair the user has claimed is cached in a single local storage slot
//! and shown in the active-repair panel. The slot is advisory only and is
//! never reconciled with the server.

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::config::UiConfig;
use crate::coordinator::{Outcome, StatusUpdateCoordinator};
use crate::dom::{Element, Page};
use crate::models::{ActiveRepairRecord, Item};
use crate::scheduler::Scheduler;
use crate::storage::KeyValueStore;

pub const PANEL_ID: &str = "active-repair-panel";
pub const VEHICLE_ID: &str = "active-repair-vehicle";
pub const CLIENT_ID: &str = "active-repair-client";
pub const START_ID: &str = "active-repair-start";
pub const ELAPSED_ID: &str = "active-repair-elapsed";
pub const CLEAR_ID: &str = "active-repair-clear";

/// `"2h 05m"`, or `"12m"` under an hour. Clock skew reads as zero.
pub fn elapsed_label(start: DateTime<Utc>, now_ms: f64) -> String {
    let elapsed_ms = (now_ms as i64 - start.timestamp_millis()).max(0);
    let minutes = elapsed_ms / 60_000;
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

#[derive(Clone)]
pub struct ActiveRepairManager<P: Page, S: KeyValueStore> {
    page: P,
    storage: S,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<UiConfig>,
}

impl<P: Page, S: KeyValueStore> ActiveRepairManager<P, S> {
    pub fn new(page: P, storage: S, scheduler: Rc<dyn Scheduler>, config: Rc<UiConfig>) -> Self {
        Self { page, storage, scheduler, config }
    }

    /// Stored record; a corrupt slot is cleared and reads as empty
    pub fn load(&self) -> Option<ActiveRepairRecord> {
        let raw = self.storage.get(&self.config.active_repair_key)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("clearing corrupt active repair slot: {}", e);
                self.storage.remove(&self.config.active_repair_key);
                None
            }
        }
    }

    pub fn save(&self, record: &ActiveRepairRecord) {
        match serde_json::to_string(record) {
            Ok(json) => self.storage.set(&self.config.active_repair_key, &json),
            Err(e) => log::warn!("failed to serialize active repair {}: {}", record.id, e),
        }
    }

    pub fn clear(&self) {
        self.storage.remove(&self.config.active_repair_key);
        self.render_record(None);
    }

    /// Load and render; called once on page load
    pub fn restore(&self) -> Option<ActiveRepairRecord> {
        let record = self.load();
        self.render_record(record.as_ref());
        record
    }

    pub fn refresh_elapsed(&self) {
        if let (Some(record), Some(elapsed)) = (self.load(), self.page.by_id(ELAPSED_ID)) {
            elapsed.set_text(&elapsed_label(record.start_time, self.scheduler.now_ms()));
        }
    }

    /// Claim `repair` through the coordinator and remember it on success
    pub async fn claim(
        &self,
        coordinator: &StatusUpdateCoordinator<P>,
        repair: &Item,
        control: &P::Element,
    ) -> Outcome {
        let outcome = coordinator.claim_repair(&repair.id, control).await;
        if let Outcome::Applied(_) = outcome {
            match ActiveRepairRecord::started(repair, self.scheduler.now_ms()) {
                Some(record) => {
                    self.save(&record);
                    self.render_record(Some(&record));
                }
                None => log::warn!("clock out of range, not caching repair {}", repair.id),
            }
        }
        outcome
    }

    fn render_record(&self, record: Option<&ActiveRepairRecord>) {
        let Some(panel) = self.page.by_id(PANEL_ID) else {
            return;
        };
        let Some(record) = record else {
            panel.add_class("d-none");
            return;
        };

        let fields = [
            (VEHICLE_ID, record.vehicle.clone()),
            (CLIENT_ID, record.client.clone()),
            (START_ID, record.start_time.format("%Y-%m-%d %H:%M UTC").to_string()),
            (ELAPSED_ID, elapsed_label(record.start_time, self.scheduler.now_ms())),
        ];
        for (id, value) in fields {
            if let Some(el) = self.page.by_id(id) {
                el.set_text(&value);
            }
        }
        panel.set_attribute("data-repair-id", &record.id);
        panel.remove_class("d-none");
    }
}
