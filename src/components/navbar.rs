//! Navbar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::use_app_context;
use crate::routes;
use crate::theme::Theme;

const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", routes::HOME),
    ("Portfolio", routes::PORTFOLIO),
    ("Contact", routes::CONTACT),
];

#[component]
pub fn Navbar() -> impl IntoView {
    let (open, set_open) = signal(false);

    let links = move || {
        NAV_ITEMS
            .iter()
            .map(|(name, path)| {
                view! {
                    <A href=*path attr:class="nav-link" on:click=move |_| set_open.set(false)>
                        {*name}
                    </A>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="navbar">
            <div class="navbar-inner">
                <A href=routes::HOME attr:class="brand">
                    <span class="brand-mark">"</>"</span>
                    <span class="brand-name">"FrontEndFix"</span>
                </A>
                <div class="nav-links desktop">
                    {links}
                    <ThemeToggle />
                </div>
                <button
                    type="button"
                    class="menu-btn"
                    aria-label="Toggle menu"
                    on:click=move |_| set_open.update(|o| *o = !*o)
                >
                    {move || if open.get() { "✕" } else { "☰" }}
                </button>
            </div>
            <Show when=move || open.get()>
                <div class="nav-links mobile">
                    {links}
                    <ThemeToggle />
                </div>
            </Show>
        </nav>
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = use_app_context().theme;

    view! {
        <button
            type="button"
            class="theme-toggle"
            aria-label="Toggle theme"
            on:click=move |_| theme.toggle()
        >
            {move || match theme.get() {
                Theme::Dark => "☀",
                Theme::Light => "☾",
            }}
        </button>
    }
}
