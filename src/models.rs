//! Frontend Models
//!
//! Data structures matching what the server renders and returns.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dom::Element;

/// Opaque identifier of a task or repair as rendered in `data-*-id` attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self::new(id.to_string())
    }
}

/// Target status of a task, passed through to the URL as the page renders it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemStatus(String);

impl ItemStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed attribute value; `None` when blank
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        (!slug.is_empty()).then(|| Self::new(slug))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemStatus {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

/// Task or repair card as known to the client
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub status: Option<ItemStatus>,
    pub vehicle: String,
    pub client: String,
}

impl Item {
    /// Read an item from an element's data attributes.
    ///
    /// `id_attr` names the identifier attribute (`data-task-id` or
    /// `data-repair-id`); `data-status`, `data-vehicle` and `data-client`
    /// are optional.
    pub fn from_dataset<E: Element>(el: &E, id_attr: &str) -> Option<Self> {
        let id = el.attribute(id_attr).filter(|id| !id.trim().is_empty())?;
        Some(Self {
            id: ItemId::new(id.trim()),
            status: el.attribute("data-status").as_deref().and_then(ItemStatus::from_slug),
            vehicle: el.attribute("data-vehicle").unwrap_or_default(),
            client: el.attribute("data-client").unwrap_or_default(),
        })
    }
}

/// Notification severity, rendered as `alert-{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn css_suffix(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Danger => "danger",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

/// The repair the user is currently working on, kept in local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRepairRecord {
    pub id: String,
    pub vehicle: String,
    pub client: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
}

impl ActiveRepairRecord {
    /// Record for `repair` claimed at `now_ms` (milliseconds since the epoch)
    pub fn started(repair: &Item, now_ms: f64) -> Option<Self> {
        let start_time = DateTime::from_timestamp_millis(now_ms as i64)?;
        Some(Self {
            id: repair.id.to_string(),
            vehicle: repair.vehicle.clone(),
            client: repair.client.clone(),
            start_time,
        })
    }
}

/// Body returned by the state-changing endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    /// Failure text; endpoints disagree on the field name so both are accepted.
    pub fn failure_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}
