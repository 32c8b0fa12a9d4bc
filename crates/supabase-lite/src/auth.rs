//! Password auth against GoTrue.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{error_message, parse_body, ServiceError, ServiceResult};

/// Refresh this many seconds before the token actually expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Signed-in session. Serializable so the app can persist it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at
            .map(|at| at <= now_secs + EXPIRY_MARGIN_SECS)
            .unwrap_or(false)
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now_secs + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// GoTrue answers bad email/password and bad refresh tokens with 400/401.
fn token_error(status: u16, body: &str) -> ServiceError {
    match status {
        400 | 401 => ServiceError::InvalidCredentials,
        _ => ServiceError::Rejected { status, message: error_message(body) },
    }
}

pub(crate) fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

impl Client {
    async fn token_grant<B: Serialize>(&self, grant_type: &str, body: &B) -> ServiceResult<Session> {
        let url = format!("{}/token?grant_type={}", self.config().auth_url(), grant_type);
        let response = Request::post(&url)
            .header("apikey", self.config().anon_key())
            .json(body)?
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(token_error(status, &text));
        }
        let token: TokenResponse = serde_json::from_str(&text)?;
        let session = token.into_session(now_secs());
        self.set_access_token(Some(session.access_token.clone()));
        Ok(session)
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> ServiceResult<Session> {
        self.token_grant("password", &PasswordGrant { email, password }).await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> ServiceResult<Session> {
        self.token_grant("refresh_token", &RefreshGrant { refresh_token }).await
    }

    /// Adopt a previously persisted session without a network round trip.
    pub fn restore_session(&self, session: &Session) {
        self.set_access_token(Some(session.access_token.clone()));
    }

    /// Revoke the remote session. The local token is cleared whatever the outcome.
    pub async fn sign_out(&self) -> ServiceResult<()> {
        let url = format!("{}/logout", self.config().auth_url());
        let result: ServiceResult<()> = async {
            let response = self.authorize(Request::post(&url)).send().await?;
            let status = response.status();
            let text = response.text().await?;
            parse_body(status, &text).map(|_| ())
        }
        .await;
        self.set_access_token(None);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User { id: "u1".into(), email: Some("admin@example.com".into()) }
    }

    #[test]
    fn test_token_response_expiry() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token":"a","refresh_token":"r","expires_in":3600,
                "user":{"id":"u1","email":"admin@example.com","role":"authenticated"}}"#,
        )
        .unwrap();
        let session = token.into_session(1_000);
        assert_eq!(session.expires_at, Some(4_600));
        assert_eq!(session.user, user());
    }

    #[test]
    fn test_explicit_expires_at_wins() {
        let token = TokenResponse {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_in: Some(3600),
            expires_at: Some(42),
            user: user(),
        };
        assert_eq!(token.into_session(1_000).expires_at, Some(42));
    }

    #[test]
    fn test_is_expired_uses_margin() {
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: Some(1_000),
            user: user(),
        };
        assert!(!session.is_expired(900));
        assert!(session.is_expired(950));
        assert!(session.is_expired(2_000));

        let open_ended = Session { expires_at: None, ..session };
        assert!(!open_ended.is_expired(i64::MAX - 100));
    }

    #[test]
    fn test_token_error_mapping() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(token_error(400, body), ServiceError::InvalidCredentials);
        assert_eq!(token_error(401, body), ServiceError::InvalidCredentials);
        assert_eq!(
            token_error(500, body),
            ServiceError::Rejected { status: 500, message: "Invalid login credentials".into() }
        );
    }
}
