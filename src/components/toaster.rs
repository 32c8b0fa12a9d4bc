//! Toast container, bottom right.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::notify::ToastKind;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_app_context().toasts;

    view! {
        <div class="toaster">
            <For
                each=move || toasts.items()
                key=|toast| toast.id
                children=move |toast| {
                    let (icon, class) = match toast.kind {
                        ToastKind::Success => ("✓", "toast toast-success"),
                        ToastKind::Error => ("✕", "toast toast-error"),
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status" on:click=move |_| toasts.dismiss(id)>
                            <span class="toast-icon">{icon}</span>
                            <span class="toast-message">{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
