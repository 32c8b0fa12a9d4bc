//! Error types shared by every part of the client.

use serde_json::Value;
use thiserror::Error;

/// Startup configuration errors. Fatal: the caller should not continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
}

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("refusing to {0} without a filter")]
    MissingFilter(&'static str),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("browser api error: {0}")]
    Platform(String),
    #[error("realtime error: {0}")]
    Realtime(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for ServiceError {
    fn from(err: gloo_net::Error) -> Self {
        ServiceError::Network(err.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for ServiceError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ServiceError::Platform(format!("{:?}", value))
    }
}

/// Pull a human readable message out of a PostgREST, GoTrue or Storage error body.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() { "unknown error".to_string() } else { trimmed.to_string() };
    };
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// Turn a status + body pair into the parsed JSON body or a `Rejected` error.
pub(crate) fn parse_body(status: u16, body: &str) -> ServiceResult<Value> {
    if !(200..300).contains(&status) {
        return Err(ServiceError::Rejected { status, message: error_message(body) });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}
