//! Project Form Component
//!
//! Create or edit a project, with an optional video upload.

use leptos::ev::{Event, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use web_sys::{Blob, HtmlInputElement};

use crate::commands::{
    create_project, discard_videos, update_project, upload_video, ProjectDraft, VideoFile, VideoSession,
};
use crate::context::use_app_context;
use crate::models::{Project, ProjectCategory};

#[component]
pub fn ProjectForm(
    /// Project to edit; `None` creates a new one
    project: Option<Project>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let editing_id = project.as_ref().map(|p| p.id.clone());
    let is_edit = editing_id.is_some();
    let draft = RwSignal::new(project.as_ref().map(ProjectDraft::from_project).unwrap_or_default());
    let saving = RwSignal::new(false);
    let uploading = RwSignal::new(false);
    let progress = RwSignal::new(0u8);
    let videos = StoredValue::new(VideoSession::new(project.as_ref().and_then(|p| p.video_url.clone())));

    let discard = move |urls: Vec<String>| {
        if urls.is_empty() {
            return;
        }
        spawn_local(async move {
            discard_videos(&ctx.client(), &urls).await;
        });
    };

    // Closing without a save leaves this session's uploads unreferenced.
    on_cleanup(move || {
        if let Some(urls) = videos.try_update_value(VideoSession::take_after_cancel) {
            discard(urls);
        }
    });

    let on_video = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
        let meta = VideoFile { name: file.name(), mime: file.type_(), size: file.size() as u64 };
        if let Err(e) = meta.validate() {
            ctx.toasts.error(e.to_string());
            input.set_value("");
            return;
        }

        uploading.set(true);
        progress.set(0);
        let on_progress: Rc<dyn Fn(u8)> = Rc::new(move |p| {
            progress.try_set(p);
        });
        spawn_local(async move {
            let client = ctx.client();
            let body: &Blob = file.as_ref();
            match upload_video(&client, &meta, body, on_progress).await {
                Ok(url) => {
                    videos.try_update_value(|v| v.record_upload(url.clone()));
                    draft.try_update(|d| d.video_url = url);
                    ctx.toasts.success("Video uploaded successfully");
                }
                Err(e) => ctx.report("Error uploading video", e),
            }
            uploading.try_set(false);
            progress.try_set(0);
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        let id = editing_id.clone();
        saving.set(true);
        spawn_local(async move {
            let client = ctx.client();
            let result = match &id {
                Some(id) => update_project(&client, id, &current).await,
                None => create_project(&client, &current).await,
            };
            saving.try_set(false);
            match result {
                Ok(()) => {
                    if let Some(urls) = videos.try_update_value(|v| v.take_after_save(&current.video_url)) {
                        discard(urls);
                    }
                    ctx.toasts.success(if id.is_some() {
                        "Project updated successfully"
                    } else {
                        "Project created successfully"
                    });
                    on_close.run(());
                }
                Err(e) => ctx.report("Error saving project", e),
            }
        });
    };

    view! {
        <div class="panel project-form">
            <div class="panel-header">
                <h2>{if is_edit { "Edit Project" } else { "New Project" }}</h2>
                <button type="button" class="icon-btn" on:click=move |_| on_close.run(())>"✕"</button>
            </div>
            <form on:submit=on_submit>
                <label>
                    "Title"
                    <input
                        type="text"
                        required
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Description"
                    <textarea
                        rows="4"
                        required
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Category"
                    <select
                        prop:value=move || draft.with(|d| d.category.as_str())
                        on:change=move |ev| {
                            if let Some(category) = ProjectCategory::parse(&event_target_value(&ev)) {
                                draft.update(|d| d.category = category);
                            }
                        }
                    >
                        {ProjectCategory::ALL
                            .into_iter()
                            .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Image URL"
                    <input
                        type="url"
                        required
                        prop:value=move || draft.with(|d| d.image_url.clone())
                        on:input=move |ev| draft.update(|d| d.image_url = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Video"
                    <input type="file" accept="video/*" on:change=on_video prop:disabled=move || uploading.get() />
                </label>
                <Show when=move || uploading.get()>
                    <div class="progress">
                        <div class="progress-bar" style:width=move || format!("{}%", progress.get())></div>
                    </div>
                    <p class="muted">{move || format!("Uploading... {}%", progress.get())}</p>
                </Show>
                <Show when=move || draft.with(|d| !d.video_url.is_empty())>
                    <p class="muted video-url">
                        {move || draft.with(|d| d.video_url.clone())}
                        <button type="button" class="link-btn" on:click=move |_| draft.update(|d| d.video_url.clear())>
                            "Remove"
                        </button>
                    </p>
                </Show>
                <label>
                    "Demo URL"
                    <input
                        type="url"
                        prop:value=move || draft.with(|d| d.demo_url.clone())
                        on:input=move |ev| draft.update(|d| d.demo_url = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Code URL"
                    <input
                        type="url"
                        prop:value=move || draft.with(|d| d.code_url.clone())
                        on:input=move |ev| draft.update(|d| d.code_url = event_target_value(&ev))
                    />
                </label>
                <div class="form-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn-primary" disabled=move || saving.get() || uploading.get()>
                        {move || if saving.get() { "Saving..." } else if is_edit { "Update Project" } else { "Create Project" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
