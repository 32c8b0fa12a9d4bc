//! Public contact form. Writes straight into the admin inbox.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{submit_contact, ContactForm, SITE_INBOX};
use crate::context::use_app_context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Error,
}

impl FormStatus {
    pub fn button_label(&self) -> &'static str {
        match self {
            FormStatus::Sending => "Sending...",
            FormStatus::Sent => "Message Sent!",
            FormStatus::Idle | FormStatus::Error => "Send Message",
        }
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(ContactForm::default());
    let status = RwSignal::new(FormStatus::Idle);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        status.set(FormStatus::Sending);
        spawn_local(async move {
            match submit_contact(&ctx.client(), &current).await {
                Ok(()) => {
                    status.try_set(FormStatus::Sent);
                    form.try_set(ContactForm::default());
                    ctx.toasts.success("Message sent successfully!");
                }
                Err(e) => {
                    status.try_set(FormStatus::Error);
                    ctx.report("Failed to send message", e);
                }
            }
        });
    };

    view! {
        <div class="page container">
            <div class="section-title">
                <h1>"Get in Touch"</h1>
                <p class="muted">"Have a project in mind? Let's work together to create something amazing."</p>
            </div>

            <div class="grid two">
                <form class="panel" on:submit=on_submit>
                    <label>
                        "Name"
                        <input
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Email"
                        <input
                            type="email"
                            required
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Message"
                        <textarea
                            rows="5"
                            required
                            prop:value=move || form.with(|f| f.message.clone())
                            on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button
                        type="submit"
                        class="btn-primary wide"
                        disabled=move || status.get() == FormStatus::Sending
                    >
                        {move || status.get().button_label()}
                    </button>
                </form>

                <div class="panel contact-info">
                    <h3>"Contact Information"</h3>
                    <p class="muted">"Feel free to reach out through the form or any of these channels."</p>
                    <a href=format!("mailto:{}", SITE_INBOX)>{SITE_INBOX}</a>
                    <div class="social">
                        <a href="https://github.com" target="_blank" rel="noopener noreferrer">"GitHub"</a>
                        <a href="https://linkedin.com" target="_blank" rel="noopener noreferrer">"LinkedIn"</a>
                        <a href="https://twitter.com" target="_blank" rel="noopener noreferrer">"Twitter"</a>
                    </div>
                </div>
            </div>
        </div>
    }
}
