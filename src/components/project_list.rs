//! Project List Component
//!
//! Admin view of all projects with edit and delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{delete_project, project_query};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::Project;
use crate::resource::{use_live_table, ChangeNotices, TableScope};
use crate::store::{store_open_project_form, use_dashboard_store};

const NOTICES: ChangeNotices = ChangeNotices {
    inserted: "New project added!",
    updated: "Project updated",
    deleted: "Project deleted",
};

#[component]
pub fn ProjectList() -> impl IntoView {
    let projects = use_live_table::<Project>(
        || TableScope::whole::<Project>(project_query()),
        "Error loading projects",
        Some(NOTICES),
    );

    view! {
        <div class="panel">
            <Show
                when=move || !projects.loading()
                fallback=|| view! { <div class="loading">"Loading projects..."</div> }
            >
                <Show
                    when=move || !projects.is_empty()
                    fallback=|| view! { <p class="empty">"No projects yet."</p> }
                >
                    <ul class="row-list">
                        {move || {
                            projects
                                .rows()
                                .into_iter()
                                .map(|project| view! { <ProjectRow project=project /> })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn ProjectRow(project: Project) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();

    let on_delete = {
        let project = project.clone();
        Callback::new(move |_: ()| {
            let project = project.clone();
            spawn_local(async move {
                let client = ctx.client();
                if let Err(e) = delete_project(&client, &client, &project).await {
                    ctx.report("Error deleting project", e);
                }
            });
        })
    };
    let editable = project.clone();

    view! {
        <li class="row">
            <div class="row-main">
                <h4>{project.title.clone()}</h4>
                <span class="badge">{project.category.label()}</span>
                {project.video_url.is_some().then(|| view! { <span class="badge">"video"</span> })}
            </div>
            <div class="row-actions">
                <button
                    type="button"
                    class="btn-secondary"
                    on:click=move |_| store_open_project_form(&store, Some(editable.clone()))
                >
                    "Edit"
                </button>
                <DeleteConfirmButton button_class="btn-danger" on_confirm=on_delete />
            </div>
        </li>
    }
}
