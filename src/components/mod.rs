//! UI Components
//!
//! Leptos widgets mounted into placeholders of the server-rendered page.

mod theme_toggle;
mod release_repair_button;

pub use theme_toggle::ThemeToggle;
pub use release_repair_button::ReleaseRepairButton;
