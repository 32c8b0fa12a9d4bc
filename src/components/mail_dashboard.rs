//! Mail Dashboard Component
//!
//! Tabbed mailbox. The active tab scopes both the query and the feed.

use chrono::{Local, Utc};
use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{
    delete_mail, mail_feed, mail_query, mark_read, save_draft, send_mail, ComposeDraft, MailStats,
    SITE_INBOX,
};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{Mail, MailCategory};
use crate::resource::{use_live_table, ChangeNotices, TableScope};
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

const NOTICES: ChangeNotices = ChangeNotices {
    inserted: "New mail received!",
    updated: "Mail updated",
    deleted: "Mail deleted",
};

#[component]
pub fn MailDashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let composing = RwSignal::new(false);
    let draft = RwSignal::new(ComposeDraft::default());
    let sending = RwSignal::new(false);

    let mails = use_live_table::<Mail>(
        move || {
            let tab = store.mail_tab().get();
            TableScope::new(mail_query(tab), mail_feed(tab))
        },
        "Failed to load mails",
        Some(NOTICES),
    );

    let stats = Memo::new(move |_| MailStats::compute(&mails.rows(), Utc::now().date_naive()));

    // Send and save-as-draft share everything but the command.
    let submit = move |as_draft: bool| {
        let current = draft.get_untracked();
        let from = ctx.session.email().unwrap_or_else(|| SITE_INBOX.to_string());
        sending.set(true);
        spawn_local(async move {
            let client = ctx.client();
            let result = if as_draft {
                save_draft(&client, &from, &current).await
            } else {
                send_mail(&client, &from, &current).await
            };
            sending.try_set(false);
            match result {
                Ok(()) => {
                    draft.try_set(ComposeDraft::default());
                    composing.try_set(false);
                    ctx.toasts.success(if as_draft { "Draft saved" } else { "Mail sent successfully" });
                }
                Err(e) => ctx.report(if as_draft { "Failed to save draft" } else { "Failed to send mail" }, e),
            }
        });
    };

    let on_send = move |ev: SubmitEvent| {
        ev.prevent_default();
        submit(false);
    };

    view! {
        <div class="section">
            <div class="section-header">
                <h2>"Mail"</h2>
                <button type="button" class="btn-primary" on:click=move |_| composing.set(true)>
                    "Compose"
                </button>
            </div>

            <div class="tabs">
                {MailCategory::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            type="button"
                            class="tab"
                            class:active=move || store.mail_tab().get() == tab
                            on:click=move |_| store.mail_tab().set(tab)
                        >
                            {tab.label()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <div class="stats">
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().total}</span>
                    <span class="muted">"Total"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().today}</span>
                    <span class="muted">"Today"</span>
                </div>
                <div class="stat-card">
                    <span class="stat-value">{move || stats.get().unread}</span>
                    <span class="muted">"Unread"</span>
                </div>
            </div>

            <Show when=move || composing.get()>
                <form class="panel" on:submit=on_send>
                    <label>
                        "To"
                        <input
                            type="email"
                            required
                            prop:value=move || draft.with(|d| d.to.clone())
                            on:input=move |ev| draft.update(|d| d.to = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Subject"
                        <input
                            type="text"
                            required
                            prop:value=move || draft.with(|d| d.subject.clone())
                            on:input=move |ev| draft.update(|d| d.subject = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Message"
                        <textarea
                            rows="6"
                            required
                            prop:value=move || draft.with(|d| d.content.clone())
                            on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| composing.set(false)>
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="btn-secondary"
                            disabled=move || sending.get()
                            on:click=move |_: MouseEvent| submit(true)
                        >
                            "Save Draft"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || sending.get()>
                            {move || if sending.get() { "Sending..." } else { "Send" }}
                        </button>
                    </div>
                </form>
            </Show>

            <Show
                when=move || !mails.loading()
                fallback=|| view! { <div class="loading">"Loading mails..."</div> }
            >
                <Show
                    when=move || !mails.is_empty()
                    fallback=move || view! {
                        <p class="empty">{move || format!("No mail in {}.", store.mail_tab().get().label())}</p>
                    }
                >
                    <ul class="row-list">
                        {move || {
                            mails
                                .rows()
                                .into_iter()
                                .map(|mail| view! { <MailRow mail=mail /> })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn MailRow(mail: Mail) -> impl IntoView {
    let ctx = use_app_context();
    let unread = mail.is_unread();
    let received = mail.created_at.with_timezone(&Local).format("%b %e, %H:%M").to_string();

    let read_id = mail.id.clone();
    let on_mark_read = move |_: MouseEvent| {
        let id = read_id.clone();
        spawn_local(async move {
            if let Err(e) = mark_read(&ctx.client(), &id).await {
                ctx.report("Failed to update mail", e);
            }
        });
    };

    let id = mail.id.clone();
    let on_delete = Callback::new(move |_: ()| {
        let id = id.clone();
        spawn_local(async move {
            if let Err(e) = delete_mail(&ctx.client(), &id).await {
                ctx.report("Failed to delete mail", e);
            }
        });
    });

    view! {
        <li class="row mail-row" class:unread=unread>
            <div class="row-main">
                <h4>{mail.subject.clone()}</h4>
                <span class="muted">{format!("{} → {}", mail.from, mail.to)}</span>
                <p>{mail.content.clone()}</p>
            </div>
            <div class="row-actions">
                <span class="muted">{received}</span>
                {unread.then(|| view! {
                    <button type="button" class="btn-secondary" on:click=on_mark_read>"Mark read"</button>
                })}
                <DeleteConfirmButton button_class="btn-danger" on_confirm=on_delete />
            </div>
        </li>
    }
}
