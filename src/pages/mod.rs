//! Routed pages.

mod contact;
mod dashboard;
mod home;
mod login;
mod portfolio;

pub use contact::ContactPage;
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use portfolio::PortfolioPage;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page not-found">
            <h1>"404"</h1>
            <p class="muted">"This page does not exist."</p>
            <A href=routes::HOME attr:class="btn-primary pill">"Back home"</A>
        </div>
    }
}
