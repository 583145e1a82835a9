//! Theme Toggle Component
//!
//! Sun/moon button that flips between the light and dark theme.

use leptos::prelude::*;

use crate::dom::WebPage;
use crate::storage::BrowserStorage;
use crate::theme::{Theme, ThemeManager};

#[component]
pub fn ThemeToggle(#[prop(into)] storage_key: String) -> impl IntoView {
    let themes = ThemeManager::new(WebPage, BrowserStorage, storage_key);
    let (theme, set_theme) = signal(themes.current());

    let toggle = move |_| {
        set_theme.set(themes.toggle());
    };

    view! {
        <button
            type="button"
            class=move || match theme.get() {
                Theme::Light => "btn btn-sm btn-outline-secondary theme-toggle",
                Theme::Dark => "btn btn-sm btn-outline-light theme-toggle",
            }
            title=move || theme.get().toggle_label()
            aria-label=move || theme.get().toggle_label()
            on:click=toggle
        >
            {move || theme.get().icon()}
        </button>
    }
}
