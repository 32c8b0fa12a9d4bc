//! Route guard for admin pages.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::context::use_app_context;
use crate::routes::{guard, GuardDecision};

/// Renders `children` only with a signed-in session; otherwise redirects to
/// the login page, remembering the requested path.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_app_context().session;
    let location = use_location();

    let decision = Memo::new(move |_| {
        let requested = location.pathname.get();
        guard(session.is_restoring(), session.is_authenticated(), &requested)
    });

    move || {
        match decision.get() {
            GuardDecision::Wait => view! { <div class="loading">"Checking session..."</div> }.into_any(),
            GuardDecision::Render => children().into_any(),
            GuardDecision::Redirect(to) => view! { <Redirect path=to /> }.into_any(),
        }
    }
}
