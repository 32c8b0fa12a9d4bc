//! Admin login.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::context::use_app_context;
use crate::routes::post_login_target;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let session = ctx.session;
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let loading = RwSignal::new(false);

    let target = move || post_login_target(query.with(|q| q.get("from")).as_deref());

    // Covers both a restored session and a fresh sign-in.
    Effect::new(move |_| {
        if session.is_authenticated() {
            navigate(&target(), NavigateOptions { replace: true, ..Default::default() });
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (e, p) = (email.get_untracked(), password.get_untracked());
        loading.set(true);
        spawn_local(async move {
            match session.sign_in(&ctx.client(), &e, &p).await {
                Ok(()) => ctx.toasts.success("Welcome back!"),
                Err(err) => ctx.report("Invalid credentials", err),
            }
            loading.try_set(false);
        });
    };

    view! {
        <Show when=move || !session.is_authenticated()>
            <div class="page login">
                <div class="panel login-card">
                    <div class="lock">"🔒"</div>
                    <h2>"Admin Login"</h2>
                    <form on:submit=on_submit>
                        <label>
                            "Email address"
                            <input
                                type="email"
                                autocomplete="email"
                                required
                                placeholder="admin@example.com"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Password"
                            <div class="password-field">
                                <input
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    autocomplete="current-password"
                                    required
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                                <button
                                    type="button"
                                    class="icon-btn"
                                    aria-label="Toggle password visibility"
                                    on:click=move |_| show_password.update(|s| *s = !*s)
                                >
                                    {move || if show_password.get() { "Hide" } else { "Show" }}
                                </button>
                            </div>
                        </label>
                        <button type="submit" class="btn-primary wide" disabled=move || loading.get()>
                            {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
