//! Reminders Component

use chrono::{Local, Utc};
use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{create_reminder, delete_reminder, reminder_query, toggle_reminder, ReminderDraft};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::markdown::parse_markdown_inline;
use crate::models::Reminder;
use crate::resource::{use_live_table, ChangeNotices, TableScope};

const NOTICES: ChangeNotices = ChangeNotices {
    inserted: "New reminder added!",
    updated: "Reminder updated",
    deleted: "Reminder deleted",
};

fn fresh_draft() -> ReminderDraft {
    ReminderDraft {
        due_date: Local::now().format("%Y-%m-%dT%H:%M").to_string(),
        ..Default::default()
    }
}

#[component]
pub fn Reminders() -> impl IntoView {
    let ctx = use_app_context();
    let show_form = RwSignal::new(false);
    let draft = RwSignal::new(fresh_draft());

    let reminders = use_live_table::<Reminder>(
        || TableScope::whole::<Reminder>(reminder_query()),
        "Failed to load reminders",
        Some(NOTICES),
    );

    let sorted = move || {
        let mut rows = reminders.rows();
        rows.sort_by_key(|r| r.due_date);
        rows
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = draft.get_untracked();
        spawn_local(async move {
            match create_reminder(&ctx.client(), &current).await {
                Ok(()) => {
                    draft.try_set(fresh_draft());
                    show_form.try_set(false);
                    ctx.toasts.success("Reminder added successfully");
                }
                Err(e) => ctx.report("Failed to add reminder", e),
            }
        });
    };

    view! {
        <div class="section">
            <div class="section-header">
                <h2>"Reminders"</h2>
                <button type="button" class="btn-primary" on:click=move |_| show_form.set(true)>
                    "+ Add Reminder"
                </button>
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
                        "Due"
                        <input
                            type="datetime-local"
                            required
                            prop:value=move || draft.with(|d| d.due_date.clone())
                            on:input=move |ev| draft.update(|d| d.due_date = event_target_value(&ev))
                        />
                    </label>
                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| show_form.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary">"Add Reminder"</button>
                    </div>
                </form>
            </Show>

            <Show
                when=move || !reminders.loading()
                fallback=|| view! { <div class="loading">"Loading reminders..."</div> }
            >
                <ul class="row-list">
                    {move || {
                        sorted()
                            .into_iter()
                            .map(|reminder| view! { <ReminderRow reminder=reminder /> })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}

#[component]
fn ReminderRow(reminder: Reminder) -> impl IntoView {
    let ctx = use_app_context();
    let overdue = !reminder.completed && reminder.due_date < Utc::now();
    let due = reminder.due_date.with_timezone(&Local).format("%b %e, %Y %H:%M").to_string();

    let toggled = reminder.clone();
    let on_toggle = move |_: MouseEvent| {
        let reminder = toggled.clone();
        spawn_local(async move {
            if let Err(e) = toggle_reminder(&ctx.client(), &reminder).await {
                ctx.report("Failed to update reminder", e);
            }
        });
    };

    let id = reminder.id.clone();
    let on_delete = Callback::new(move |_: ()| {
        let id = id.clone();
        spawn_local(async move {
            if let Err(e) = delete_reminder(&ctx.client(), &id).await {
                ctx.report("Failed to delete reminder", e);
            }
        });
    });

    view! {
        <li class="row" class:done=reminder.completed class:overdue=overdue>
            <button
                type="button"
                class="check"
                aria-label="Toggle complete"
                on:click=on_toggle
            >
                {if reminder.completed { "☑" } else { "☐" }}
            </button>
            <div class="row-main">
                <h4>{reminder.title.clone()}</h4>
                {reminder.description.as_deref().map(|d| view! { <p class="muted" inner_html=parse_markdown_inline(d)></p> })}
                <span class="muted">{due}</span>
            </div>
            <div class="row-actions">
                <DeleteConfirmButton button_class="btn-danger" on_confirm=on_delete />
            </div>
        </li>
    }
}
