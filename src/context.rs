//! Application Context
//!
//! Shared handles provided once by `App` via the Leptos context API.

use leptos::prelude::*;
use supabase_lite::Client;

use crate::notify::Toasts;
use crate::session::SessionGate;
use crate::theme::ThemeState;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Remote service client (not `Send`, so held in local storage)
    client: StoredValue<Client, LocalStorage>,
    pub session: SessionGate,
    pub theme: ThemeState,
    pub toasts: Toasts,
}

impl AppContext {
    pub fn new(client: Client) -> Self {
        Self {
            client: StoredValue::new_local(client),
            session: SessionGate::new(),
            theme: ThemeState::init(),
            toasts: Toasts::new(),
        }
    }

    /// Cheap clone of the shared client handle.
    pub fn client(&self) -> Client {
        self.client.get_value()
    }

    /// Log a failed remote call and tell the user.
    pub fn report(&self, what: &str, err: impl std::fmt::Display) {
        log::error!("{}: {}", what, err);
        self.toasts.error(what);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
