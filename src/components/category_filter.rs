//! Category Filter Component
//!
//! Row of toggle buttons; `None` means "all".

use leptos::prelude::*;

use crate::models::ProjectCategory;

/// Portfolio filter buttons
#[component]
pub fn CategoryFilter(
    current: ReadSignal<Option<ProjectCategory>>,
    on_change: impl Fn(Option<ProjectCategory>) + Copy + 'static,
) -> impl IntoView {
    let options = std::iter::once((None, "All"))
        .chain(ProjectCategory::ALL.into_iter().map(|c| (Some(c), c.label())));

    view! {
        <div class="category-filter">
            {options.map(|(value, label)| {
                let is_selected = move || current.get() == value;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "filter-btn active" } else { "filter-btn" }
                        on:click=move |_| on_change(value)
                    >
                        {label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
