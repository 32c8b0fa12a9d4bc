//! Personal Info Component
//!
//! View mode renders the bio as Markdown; edit mode works on the text form
//! (one entry per line, `platform: url` for links).

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{personal_feed, personal_query, save_personal_info, PersonalInfoForm};
use crate::context::use_app_context;
use crate::markdown::parse_markdown;
use crate::models::PersonalInfo;
use crate::resource::{use_live_table, TableScope};

#[component]
pub fn PersonalInfoPanel() -> impl IntoView {
    let ctx = use_app_context();
    let info = use_live_table::<PersonalInfo>(
        || TableScope::new(personal_query(), personal_feed()),
        "Failed to load personal information",
        None,
    );
    let editing = RwSignal::new(false);
    let form = RwSignal::new(PersonalInfoForm::default());
    let saving = RwSignal::new(false);

    let start_edit = move |_| {
        let current = info.first().unwrap_or_default();
        form.set(PersonalInfoForm::from_info(&current));
        editing.set(true);
    };

    let save = move |_| {
        let updated = form.get_untracked().to_info();
        saving.set(true);
        spawn_local(async move {
            let result = save_personal_info(&ctx.client(), &updated).await;
            saving.try_set(false);
            match result {
                Ok(()) => {
                    editing.try_set(false);
                    ctx.toasts.success("Personal information updated successfully");
                }
                Err(e) => ctx.report("Failed to save changes", e),
            }
        });
    };

    let text_area = move |label: &'static str, rows: u32, get: fn(&PersonalInfoForm) -> String, set: fn(&mut PersonalInfoForm, String)| {
        view! {
            <label>
                {label}
                <textarea
                    rows=rows.to_string()
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                ></textarea>
            </label>
        }
    };

    view! {
        <div class="section">
            <div class="section-header">
                <h2>"Personal Information"</h2>
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <button type="button" class="btn-primary" on:click=start_edit>"Edit Info"</button>
                    }
                >
                    <button type="button" class="btn-secondary" on:click=move |_| editing.set(false)>"Cancel"</button>
                    <button type="button" class="btn-primary" disabled=move || saving.get() on:click=save>
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </Show>
            </div>

            <Show
                when=move || !info.loading()
                fallback=|| view! { <div class="loading">"Loading personal information..."</div> }
            >
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        move || view! { <PersonalInfoView info=info.first().unwrap_or_default() /> }
                    }
                >
                    <div class="panel edit-grid">
                        {text_area("Bio (Markdown)", 6, |f| f.bio.clone(), |f, v| f.bio = v)}
                        {text_area("Skills (one per line)", 5, |f| f.skills.clone(), |f, v| f.skills = v)}
                        {text_area("Education (one per line)", 4, |f| f.education.clone(), |f, v| f.education = v)}
                        {text_area("Work Experience (one per line)", 4, |f| f.experience.clone(), |f, v| f.experience = v)}
                        {text_area("Interests (one per line)", 3, |f| f.interests.clone(), |f, v| f.interests = v)}
                        {text_area("Social Links (platform: url)", 3, |f| f.social_links.clone(), |f, v| f.social_links = v)}
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn PersonalInfoView(info: PersonalInfo) -> impl IntoView {
    let list = |items: Vec<String>| {
        items
            .into_iter()
            .map(|item| view! { <li>{item}</li> })
            .collect_view()
    };

    view! {
        <div class="info-grid">
            <div class="panel wide">
                <h3>"Bio"</h3>
                <div class="markdown" inner_html=parse_markdown(&info.bio)></div>
            </div>
            <div class="panel">
                <h3>"Skills"</h3>
                <div class="chips">
                    {info.skills.into_iter().map(|s| view! { <span class="chip">{s}</span> }).collect_view()}
                </div>
            </div>
            <div class="panel">
                <h3>"Education"</h3>
                <ul>{list(info.education)}</ul>
            </div>
            <div class="panel">
                <h3>"Work Experience"</h3>
                <ul>{list(info.experience)}</ul>
            </div>
            <div class="panel">
                <h3>"Interests"</h3>
                <ul>{list(info.interests)}</ul>
            </div>
            <div class="panel wide">
                <h3>"Social Links"</h3>
                <ul class="links">
                    {info
                        .social_links
                        .into_iter()
                        .map(|(platform, url)| view! {
                            <li><a href=url target="_blank" rel="noopener noreferrer">{platform}</a></li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
