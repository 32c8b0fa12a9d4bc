//! Connection settings for a hosted project.

use crate::error::ConfigError;

/// Name of the service endpoint setting.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Name of the public (anon) API key setting.
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Validated endpoint + public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    url: String,
    anon_key: String,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let anon_key = anon_key.into().trim().to_string();

        if url.is_empty() {
            return Err(ConfigError::Missing(URL_VAR));
        }
        if anon_key.is_empty() {
            return Err(ConfigError::Missing(ANON_KEY_VAR));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url));
        }
        Ok(Self { url, anon_key })
    }

    /// Build from any key/value source (build-time env, tests, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(URL_VAR).ok_or(ConfigError::Missing(URL_VAR))?;
        let anon_key = lookup(ANON_KEY_VAR).ok_or(ConfigError::Missing(ANON_KEY_VAR))?;
        Self::new(url, anon_key)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }

    pub fn realtime_url(&self) -> String {
        let base = if let Some(rest) = self.url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.url.clone()
        };
        format!("{}/realtime/v1/websocket?apikey={}&vsn=1.0.0", base, self.anon_key)
    }
}
