//! Public project grid with a category filter.

use leptos::prelude::*;

use crate::commands::project_query;
use crate::components::CategoryFilter;
use crate::markdown::parse_markdown;
use crate::models::{Project, ProjectCategory};
use crate::resource::{use_live_table, TableScope};

/// Projects in `category`, or all of them.
pub fn filter_projects(projects: Vec<Project>, category: Option<ProjectCategory>) -> Vec<Project> {
    match category {
        Some(c) => projects.into_iter().filter(|p| p.category == c).collect(),
        None => projects,
    }
}

#[component]
pub fn PortfolioPage() -> impl IntoView {
    let projects = use_live_table::<Project>(
        || TableScope::whole::<Project>(project_query()),
        "Error loading projects",
        None,
    );
    let (category, set_category) = signal::<Option<ProjectCategory>>(None);

    let visible = move || filter_projects(projects.rows(), category.get());

    view! {
        <div class="page container">
            <div class="section-title">
                <h1>"Portfolio"</h1>
                <p class="muted">"Explore my latest projects and web development solutions"</p>
            </div>

            <CategoryFilter current=category on_change=move |c| set_category.set(c) />

            <Show
                when=move || !projects.loading()
                fallback=|| view! { <div class="loading">"Loading projects..."</div> }
            >
                <div class="grid three">
                    {move || {
                        visible()
                            .into_iter()
                            .map(|project| view! { <ProjectCard project=project /> })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let link = |href: Option<String>, label: &'static str| {
        href.map(|href| view! {
            <a href=href class="pill light" target="_blank" rel="noopener noreferrer">{label}</a>
        })
    };

    view! {
        <div class="project-card">
            <div class="project-media">
                {project.image_url.clone().map(|src| view! { <img src=src alt=project.title.clone() /> })}
                {project.video_url.is_some().then(|| view! { <span class="video-badge">"▶"</span> })}
                <div class="project-overlay">
                    {link(project.demo_url.clone(), "Live Demo")}
                    {link(project.code_url.clone(), "View Code")}
                </div>
            </div>
            <h3>{project.title.clone()}</h3>
            <div class="markdown muted" inner_html=parse_markdown(&project.description)></div>
            {project.video_url.clone().map(|src| view! {
                <video src=src controls class="project-video"></video>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, category: ProjectCategory) -> Project {
        Project {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            category,
            image_url: None,
            video_url: None,
            demo_url: None,
            code_url: None,
            created_at: None,
            user_id: None,
        }
    }

    #[test]
    fn test_filter_projects() {
        let all = vec![
            project("a", ProjectCategory::WebDesign),
            project("b", ProjectCategory::Fixes),
            project("c", ProjectCategory::WebDesign),
        ];

        let ids = |rows: Vec<Project>| rows.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_projects(all.clone(), None)), ["a", "b", "c"]);
        assert_eq!(ids(filter_projects(all.clone(), Some(ProjectCategory::WebDesign))), ["a", "c"]);
        assert!(filter_projects(all, Some(ProjectCategory::UiUx)).is_empty());
    }
}
