//! Theme Manager
//!
//! Light/dark preference persisted in local storage and applied as
//! `data-bs-theme` on `<html>`.

use crate::dom::Page;
use crate::storage::KeyValueStore;

pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle button (shows what a click switches to)
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark theme",
            Theme::Dark => "Switch to light theme",
        }
    }
}

#[derive(Clone)]
pub struct ThemeManager<P: Page, S: KeyValueStore> {
    page: P,
    storage: S,
    key: String,
}

impl<P: Page, S: KeyValueStore> ThemeManager<P, S> {
    pub fn new(page: P, storage: S, key: impl Into<String>) -> Self {
        Self { page, storage, key: key.into() }
    }

    /// Saved preference; missing or unknown values mean light
    pub fn current(&self) -> Theme {
        self.storage.get(&self.key).as_deref().and_then(Theme::parse).unwrap_or_default()
    }

    pub fn apply(&self, theme: Theme) {
        self.page.set_root_attribute(THEME_ATTRIBUTE, theme.as_str());
    }

    pub fn apply_saved(&self) -> Theme {
        let theme = self.current();
        self.apply(theme);
        theme
    }

    pub fn set(&self, theme: Theme) {
        self.storage.set(&self.key, theme.as_str());
        self.apply(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        log::debug!("theme switched to {}", next.as_str());
        next
    }
}
