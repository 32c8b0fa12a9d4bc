//! Admin dashboard shell: section nav, header actions and the active panel.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{DailyActivities, MailDashboard, PersonalInfoPanel, ProjectForm, ProjectList, Reminders};
use crate::context::use_app_context;
use crate::store::{
    store_close_project_form, store_open_project_form, DashboardState, DashboardStateStoreFields,
    Section,
};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = Store::new(DashboardState::new(Local::now().date_naive()));
    provide_context(store);
    let (menu_open, set_menu_open) = signal(false);

    let on_sign_out = move |_| {
        spawn_local(async move {
            match ctx.session.sign_out(&ctx.client()).await {
                Ok(()) => ctx.toasts.success("Signed out successfully"),
                Err(e) => ctx.report("Error signing out", e),
            }
        });
    };

    let content = move || match store.section().get() {
        Section::Mail => view! { <MailDashboard /> }.into_any(),
        Section::Projects if store.show_project_form().get() => {
            let project = store.editing_project().get();
            view! {
                <ProjectForm
                    project=project
                    on_close=Callback::new(move |_: ()| store_close_project_form(&store))
                />
            }
            .into_any()
        }
        Section::Projects => view! { <ProjectList /> }.into_any(),
        Section::Personal => view! { <PersonalInfoPanel /> }.into_any(),
        Section::Activities => view! { <DailyActivities /> }.into_any(),
        Section::Reminders => view! { <Reminders /> }.into_any(),
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Admin Dashboard"</h1>
                <div class="header-actions">
                    <Show when=move || store.section().get() == Section::Projects && !store.show_project_form().get()>
                        <button
                            type="button"
                            class="btn-primary"
                            on:click=move |_| store_open_project_form(&store, None)
                        >
                            "Upload Project"
                        </button>
                    </Show>
                    <button type="button" class="btn-secondary" on:click=on_sign_out>"Sign Out"</button>
                    <button
                        type="button"
                        class="menu-btn"
                        aria-label="Toggle sections"
                        on:click=move |_| set_menu_open.update(|o| *o = !*o)
                    >
                        "☰"
                    </button>
                </div>
            </header>

            <div class="dashboard-body">
                <nav class="sidebar" class:open=move || menu_open.get()>
                    {Section::ALL
                        .into_iter()
                        .map(|section| view! {
                            <button
                                type="button"
                                class="sidebar-item"
                                class:active=move || store.section().get() == section
                                on:click=move |_| {
                                    store.section().set(section);
                                    set_menu_open.set(false);
                                }
                            >
                                {section.label()}
                            </button>
                        })
                        .collect_view()}
                </nav>
                <main class="dashboard-content">{content}</main>
            </div>
        </div>
    }
}
