//! Release Repair Button Component
//!
//! Inline confirmation for forgetting the active repair on this device.

use leptos::prelude::*;

/// Shows a × button initially. When clicked, shows "Release?" with ✓/✗ buttons.
///
/// # Arguments
/// * `on_confirm` - Runs when the user confirms
#[component]
pub fn ReleaseRepairButton(#[prop(into)] on_confirm: Callback<()>) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <Show when=move || !confirming.get()>
            <button
                type="button"
                class="btn btn-sm btn-outline-danger release-btn"
                title="Stop tracking this repair"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirming.set(true);
                }
            >
                "×"
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="release-confirm">
                <span class="release-confirm-text">"Release?"</span>
                <button
                    type="button"
                    class="btn btn-sm btn-danger confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    type="button"
                    class="btn btn-sm btn-secondary cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
