//! Delete Confirm Button Component

use leptos::prelude::*;

/// Two-step delete: the first click arms the button, "Yes" runs `on_confirm`.
///
/// Clicks don't propagate, so the button can sit inside clickable rows.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "Delete".to_string())] label: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);

    move || {
        if !armed.get() {
            return view! {
                <button
                    type="button"
                    class=button_class.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >
                    {label.clone()}
                </button>
            }
            .into_any();
        }

        view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    type="button"
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    type="button"
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        armed.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        }
        .into_any()
    }
}
