//! Shared client handle.

use gloo_net::http::RequestBuilder;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ClientConfig;
use crate::realtime::RealtimeClient;

/// Cheap-to-clone handle to one hosted project.
///
/// Holds the current user access token (if any); every REST, storage and
/// realtime call made after sign-in carries it.
#[derive(Clone)]
pub struct Client {
    inner: Rc<Inner>,
}

struct Inner {
    config: ClientConfig,
    access_token: RefCell<Option<String>>,
    realtime: RealtimeClient,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        let realtime = RealtimeClient::new(config.realtime_url(), config.anon_key().to_string());
        Self {
            inner: Rc::new(Inner {
                config,
                access_token: RefCell::new(None),
                realtime,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn realtime(&self) -> &RealtimeClient {
        &self.inner.realtime
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.access_token.borrow().clone()
    }

    /// Swap the user token; `None` falls back to the anon key.
    pub fn set_access_token(&self, token: Option<String>) {
        *self.inner.access_token.borrow_mut() = token.clone();
        self.inner.realtime.set_access_token(token);
    }

    pub(crate) fn bearer(&self) -> String {
        self.access_token()
            .unwrap_or_else(|| self.inner.config.anon_key().to_string())
    }

    pub(crate) fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", self.inner.config.anon_key())
            .header("Authorization", &format!("Bearer {}", self.bearer()))
    }
}
