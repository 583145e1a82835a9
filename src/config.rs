//! UI Configuration
//!
//! Defaults match the shop's server routes. A page can override any field by
//! embedding `<script id="ui-config" type="application/json">{...}</script>`.

use log::LevelFilter;
use serde::Deserialize;

use crate::dom::{Element, Page};

/// Element id of the optional JSON override block
pub const CONFIG_ELEMENT_ID: &str = "ui-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cookie holding the CSRF token
    pub csrf_cookie: String,
    /// Header the token is sent under
    pub csrf_header: String,
    /// `POST {prefix}/{task_id}/{status}/`
    pub task_status_endpoint: String,
    /// `POST {prefix}/{repair_id}/`
    pub repair_claim_endpoint: String,
    pub theme_key: String,
    pub active_repair_key: String,
    pub notification_ms: u32,
    /// Fade transition before a notification is removed
    pub fade_ms: u32,
    /// Card removal animation window
    pub removal_ms: u32,
    /// Delay before reloading after a successful action; `null` disables it
    pub reload_delay_ms: Option<u32>,
    pub active_repair_refresh_ms: u32,
    pub messages: Messages,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            csrf_cookie: "csrftoken".into(),
            csrf_header: "X-CSRFToken".into(),
            task_status_endpoint: "/tareas/cambiar-estado".into(),
            repair_claim_endpoint: "/reparaciones/tomar".into(),
            theme_key: "theme".into(),
            active_repair_key: "activeRepair".into(),
            notification_ms: 5000,
            fade_ms: 300,
            removal_ms: 300,
            reload_delay_ms: Some(1000),
            active_repair_refresh_ms: 60_000,
            messages: Messages::default(),
            log_level: "info".into(),
        }
    }
}

/// User-facing texts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub task_updated: String,
    pub repair_claimed: String,
    pub update_failed: String,
    pub claim_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            task_updated: "Task updated successfully".into(),
            repair_claimed: "Repair assigned to you".into(),
            update_failed: "Failed to update the status".into(),
            claim_failed: "Failed to take the repair".into(),
        }
    }
}

impl UiConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Defaults, overridden by the page's config block when present and valid
    pub fn load<P: Page>(page: &P) -> Self {
        let Some(block) = page.by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        match Self::from_json(&block.text()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring invalid #{} block: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
