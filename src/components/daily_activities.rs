//! Daily Activities Component
//!
//! Planner for one day: the date picker scopes both the query and the feed.

use chrono::NaiveDate;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{
    activity_feed, activity_query, create_activity, delete_activity, total_minutes, ActivityDraft,
    DURATION_STEP, MIN_DURATION,
};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::markdown::parse_markdown_inline;
use crate::models::{Activity, ActivityCategory};
use crate::resource::{use_live_table, ChangeNotices, TableScope};
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

const NOTICES: ChangeNotices = ChangeNotices {
    inserted: "New activity added!",
    updated: "Activity updated",
    deleted: "Activity deleted",
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[component]
pub fn DailyActivities() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let show_form = RwSignal::new(false);
    let draft = RwSignal::new(ActivityDraft::default());

    let activities = use_live_table::<Activity>(
        move || {
            let day = store.activity_date().get();
            TableScope::new(activity_query(day), activity_feed(day))
        },
        "Failed to load activities",
        Some(NOTICES),
    );

    let sorted = move || {
        let mut rows = activities.rows();
        rows.sort_by(|a, b| a.activity_time.cmp(&b.activity_time));
        rows
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let day = store.activity_date().get_untracked();
        let current = draft.get_untracked();
        spawn_local(async move {
            let client = ctx.client();
            match create_activity(&client, day, &current).await {
                Ok(()) => {
                    draft.try_set(ActivityDraft::default());
                    show_form.try_set(false);
                    ctx.toasts.success("Activity added successfully");
                }
                Err(e) => ctx.report("Failed to add activity", e),
            }
        });
    };

    view! {
        <div class="section">
            <div class="section-header">
                <h2>"Daily Activities"</h2>
                <button type="button" class="btn-primary" on:click=move |_| show_form.set(true)>
                    "+ Add Activity"
                </button>
            </div>

            <div class="panel">
                <label>
                    "Date"
                    <input
                        type="date"
                        prop:value=move || store.activity_date().get().format(DATE_FORMAT).to_string()
                        on:change=move |ev| {
                            if let Ok(day) = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT) {
                                store.activity_date().set(day);
                            }
                        }
                    />
                </label>
                <p class="muted">
                    {move || format!("{} activities, {} minutes planned", activities.len(), total_minutes(&activities.rows()))}
                </p>
            </div>

            <Show when=move || show_form.get()>
                <form class="panel" on:submit=on_submit>
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
                            rows="3"
                            prop:value=move || draft.with(|d| d.description.clone())
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label>
                        "Category"
                        <select
                            prop:value=move || draft.with(|d| d.category.as_str())
                            on:change=move |ev| {
                                if let Some(category) = ActivityCategory::parse(&event_target_value(&ev)) {
                                    draft.update(|d| d.category = category);
                                }
                            }
                        >
                            {ActivityCategory::ALL
                                .into_iter()
                                .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <label>
                        "Time"
                        <input
                            type="time"
                            required
                            prop:value=move || draft.with(|d| d.activity_time.clone())
                            on:input=move |ev| draft.update(|d| d.activity_time = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Duration (minutes)"
                        <input
                            type="number"
                            required
                            min=MIN_DURATION.to_string()
                            step=DURATION_STEP.to_string()
                            prop:value=move || draft.with(|d| d.duration.to_string())
                            on:input=move |ev| {
                                if let Ok(minutes) = event_target_value(&ev).parse::<u32>() {
                                    draft.update(|d| d.duration = minutes);
                                }
                            }
                        />
                    </label>
                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| show_form.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary">"Add Activity"</button>
                    </div>
                </form>
            </Show>

            <Show
                when=move || !activities.loading()
                fallback=|| view! { <div class="loading">"Loading activities..."</div> }
            >
                <ul class="row-list">
                    {move || {
                        sorted()
                            .into_iter()
                            .map(|activity| view! { <ActivityRow activity=activity /> })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}

#[component]
fn ActivityRow(activity: Activity) -> impl IntoView {
    let ctx = use_app_context();
    let id = activity.id.clone();
    let on_delete = Callback::new(move |_: ()| {
        let id = id.clone();
        spawn_local(async move {
            if let Err(e) = delete_activity(&ctx.client(), &id).await {
                ctx.report("Failed to delete activity", e);
            }
        });
    });

    view! {
        <li class="row">
            <div class="row-main">
                <span class="time">{activity.time_label().to_string()}</span>
                <div>
                    <h4>{activity.title.clone()}</h4>
                    <p class="muted" inner_html=parse_markdown_inline(&activity.description)></p>
                </div>
            </div>
            <div class="row-actions">
                <span class="badge">{activity.category.label()}</span>
                <span class="muted">{format!("{} min", activity.duration)}</span>
                <DeleteConfirmButton button_class="btn-danger" on_confirm=on_delete />
            </div>
        </li>
    }
}
