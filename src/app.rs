//! FrontEndFix App
//!
//! Root component: shared context, session restore and the route table.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use supabase_lite::Client;

use crate::components::{Footer, Navbar, RequireAuth, Toaster};
use crate::context::AppContext;
use crate::pages::{ContactPage, DashboardPage, HomePage, LoginPage, NotFoundPage, PortfolioPage};

#[component]
pub fn App(client: Client) -> impl IntoView {
    let ctx = AppContext::new(client);
    provide_context(ctx);

    spawn_local(async move {
        ctx.session.restore(&ctx.client()).await;
    });

    view! {
        <Router>
            <div class="app">
                <Navbar />
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFoundPage /> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/portfolio") view=PortfolioPage />
                        <Route path=path!("/contact") view=ContactPage />
                        <Route path=path!("/admin") view=LoginPage />
                        <Route
                            path=path!("/admin/dashboard")
                            view=|| view! { <RequireAuth><DashboardPage /></RequireAuth> }
                        />
                    </Routes>
                </main>
                <Footer />
                <Toaster />
            </div>
        </Router>
    }
}
