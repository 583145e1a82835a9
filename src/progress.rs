//! Progress Bar Colouring
//!
//! `.progress-bar` elements are coloured by their `aria-valuenow`.

use crate::dom::{Element, Page};

pub const LOW_THRESHOLD: f64 = 30.0;
pub const HIGH_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub fn css_class(&self) -> &'static str {
        match self {
            Band::Low => "bg-danger",
            Band::Mid => "bg-warning",
            Band::High => "bg-success",
        }
    }
}

const BAND_CLASSES: [&str; 3] = ["bg-danger", "bg-warning", "bg-success"];

pub fn classify(value: f64) -> Band {
    if value < LOW_THRESHOLD {
        Band::Low
    } else if value < HIGH_THRESHOLD {
        Band::Mid
    } else {
        Band::High
    }
}

/// Recolour every progress bar with a numeric value. Returns how many were updated.
pub fn apply_bands<P: Page>(page: &P) -> usize {
    let mut updated = 0;
    for bar in page.query_all(".progress-bar") {
        let Some(value) = bar.attribute("aria-valuenow").and_then(|v| v.trim().parse::<f64>().ok()) else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        for class in BAND_CLASSES {
            bar.remove_class(class);
        }
        bar.add_class(classify(value).css_class());
        updated += 1;
    }
    updated
}
