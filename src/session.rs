//! Session Gate
//!
//! Tracks the signed-in identity. The session is persisted in localStorage,
//! restored at startup and refreshed shortly before its access token expires.
//! A failed refresh drops the session, which sends the admin back to login.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use supabase_lite::{Client, ServiceResult, Session};

use crate::browser;

const STORAGE_KEY: &str = "frontendfix.session";
/// Refresh this long before `expires_at`
const REFRESH_LEAD_SECS: i64 = 60;
/// Longest single timer; a later expiry is re-armed after a refresh anyway.
const MAX_REFRESH_DELAY_MS: i64 = 24 * 60 * 60 * 1000;

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

fn load_persisted() -> Option<Session> {
    let text = browser::storage_get(STORAGE_KEY)?;
    decode_session(&text)
}

pub fn decode_session(text: &str) -> Option<Session> {
    match serde_json::from_str(text) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("discarding unreadable stored session: {}", e);
            None
        }
    }
}

fn persist(session: &Session) {
    match serde_json::to_string(session) {
        Ok(text) => browser::storage_set(STORAGE_KEY, &text),
        Err(e) => log::error!("could not persist session: {}", e),
    }
}

/// How long to wait before refreshing a token that expires at `expires_at`.
/// `None` when the token carries no expiry.
pub fn refresh_delay_ms(expires_at: Option<i64>, now_secs: i64) -> Option<u32> {
    let expires_at = expires_at?;
    let secs = (expires_at - REFRESH_LEAD_SECS - now_secs).max(0);
    let ms = secs.saturating_mul(1000).min(MAX_REFRESH_DELAY_MS);
    u32::try_from(ms).ok()
}

#[derive(Clone, Copy)]
pub struct SessionGate {
    session: RwSignal<Option<Session>>,
    restoring: RwSignal<bool>,
    /// Pending token refresh; dropping it cancels the timer
    refresh_timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            restoring: RwSignal::new(true),
            refresh_timer: StoredValue::new_local(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// True until the persisted session has been checked.
    pub fn is_restoring(&self) -> bool {
        self.restoring.get()
    }

    pub fn email(&self) -> Option<String> {
        self.session.with(|s| s.as_ref().and_then(|s| s.user.email.clone()))
    }

    /// Pick up a stored session. An expired one gets a single refresh attempt.
    pub async fn restore(&self, client: &Client) {
        match load_persisted() {
            Some(stored) if stored.is_expired(now_secs()) => self.refresh(client, &stored.refresh_token).await,
            Some(stored) => {
                client.restore_session(&stored);
                self.adopt(client, stored);
            }
            None => {}
        }
        self.restoring.try_set(false);
    }

    pub async fn sign_in(&self, client: &Client, email: &str, password: &str) -> ServiceResult<()> {
        let session = client.sign_in_with_password(email, password).await?;
        log::info!("signed in as {}", session.user.id);
        self.adopt(client, session);
        Ok(())
    }

    /// The local identity is cleared even if the remote logout fails.
    pub async fn sign_out(&self, client: &Client) -> ServiceResult<()> {
        let result = client.sign_out().await;
        self.clear_local(client);
        result
    }

    fn adopt(&self, client: &Client, session: Session) {
        persist(&session);
        self.schedule_refresh(client, &session);
        self.session.try_set(Some(session));
    }

    fn clear_local(&self, client: &Client) {
        self.refresh_timer.try_update_value(|timer| *timer = None);
        client.set_access_token(None);
        browser::storage_remove(STORAGE_KEY);
        self.session.try_set(None);
    }

    async fn refresh(&self, client: &Client, refresh_token: &str) {
        match client.refresh_session(refresh_token).await {
            Ok(fresh) => {
                log::info!("session refreshed");
                self.adopt(client, fresh);
            }
            Err(e) => {
                log::warn!("session could not be refreshed, signing out: {}", e);
                self.clear_local(client);
            }
        }
    }

    /// Arm the timer for `session`, replacing any earlier one.
    fn schedule_refresh(&self, client: &Client, session: &Session) {
        let timer = refresh_delay_ms(session.expires_at, now_secs()).map(|delay| {
            let gate = *self;
            let client = client.clone();
            let refresh_token = session.refresh_token.clone();
            log::debug!("token refresh in {} ms", delay);
            Timeout::new(delay, move || {
                spawn_local(async move { gate.refresh(&client, &refresh_token).await });
            })
        });
        self.refresh_timer.try_update_value(|slot| *slot = timer);
    }
}
