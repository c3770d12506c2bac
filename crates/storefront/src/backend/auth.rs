//! Hosted auth service client.
//!
//! Password-based sign-up / sign-in / sign-out against the backend's auth
//! endpoint. The storefront never sees password hashes; it exchanges
//! credentials for an access token and keeps that token in the session.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use campus_eats_core::{Email, EmailError, UserId};

use crate::config::BackendConfig;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format (rejected before any network call).
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    AlreadyRegistered,

    /// Password rejected by the auth service.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Sign-up succeeded but the account needs email confirmation before
    /// a session is issued.
    #[error("email confirmation required")]
    ConfirmationRequired,

    /// The auth service rejected the request for another reason.
    #[error("auth service error: {0}")]
    Service(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The identity returned by the auth service.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Stable user ID.
    pub id: UserId,
    /// Sign-in email.
    pub email: Email,
    /// Display name from the profile metadata.
    pub full_name: Option<String>,
}

/// An authenticated session issued by the auth service.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Bearer token for backend calls scoped to this user.
    pub access_token: String,
    /// The signed-in user.
    pub user: AuthUser,
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<WireUser>,
    // Sign-up without auto-confirm returns the bare user object instead.
    #[serde(flatten)]
    bare_user: Option<WireUserFields>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    #[serde(flatten)]
    fields: WireUserFields,
}

#[derive(Debug, Deserialize)]
struct WireUserFields {
    id: UserId,
    email: String,
    #[serde(default)]
    user_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
struct WireError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl WireError {
    fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.error)
            .unwrap_or_else(|| "unknown auth error".to_string())
    }
}

impl WireUserFields {
    fn into_user(self) -> Result<AuthUser, AuthError> {
        let full_name = self
            .user_metadata
            .as_ref()
            .and_then(|m| m.get("full_name"))
            .and_then(|v| v.as_str())
            .map(str::to_owned);

        Ok(AuthUser {
            id: self.id,
            email: Email::parse(&self.email)?,
            full_name,
        })
    }
}

// =============================================================================
// AuthClient
// =============================================================================

/// Client for the hosted auth service.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Create a new auth service client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(AuthClientInner {
                http: reqwest::Client::new(),
                auth_url: format!("{}/auth/v1", config.url.trim_end_matches('/')),
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AlreadyRegistered`] for duplicate emails,
    /// [`AuthError::WeakPassword`] when the service rejects the password,
    /// [`AuthError::ConfirmationRequired`] when the account was created but
    /// needs email confirmation, or a transport error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(
        &self,
        email: &Email,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let body = json!({
            "email": email.as_str(),
            "password": password,
            "data": { "full_name": full_name },
        });

        let response = self
            .inner
            .http
            .post(format!("{}/signup", self.inner.auth_url))
            .header("apikey", &self.inner.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<WireError>(&text)
                .unwrap_or_default()
                .message();
            return Err(Self::classify_sign_up_error(&message));
        }

        Self::parse_session(&text)
    }

    /// Exchange email + password for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for a wrong email/password
    /// combination, or a transport error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &Email, password: &str) -> Result<AuthSession, AuthError> {
        let body = json!({
            "email": email.as_str(),
            "password": password,
        });

        let response = self
            .inner
            .http
            .post(format!("{}/token", self.inner.auth_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.inner.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<WireError>(&text)
                .unwrap_or_default()
                .message();
            return Err(AuthError::Service(message));
        }

        Self::parse_session(&text)
    }

    /// Revoke the user's token.
    ///
    /// # Errors
    ///
    /// Returns a transport error; a rejected token is treated as already
    /// signed out.
    #[instrument(skip(self, access_token))]
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.inner
            .http
            .post(format!("{}/logout", self.inner.auth_url))
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        Ok(())
    }

    fn parse_session(text: &str) -> Result<AuthSession, AuthError> {
        let parsed: TokenResponse = serde_json::from_str(text)?;

        let Some(access_token) = parsed.access_token else {
            // Account created, session withheld until the email is confirmed.
            return Err(AuthError::ConfirmationRequired);
        };

        let fields = parsed
            .user
            .map(|u| u.fields)
            .or(parsed.bare_user)
            .ok_or_else(|| AuthError::Service("token response has no user".to_string()))?;

        Ok(AuthSession {
            access_token,
            user: fields.into_user()?,
        })
    }

    fn classify_sign_up_error(message: &str) -> AuthError {
        let lower = message.to_lowercase();
        if lower.contains("already registered") || lower.contains("already exists") {
            AuthError::AlreadyRegistered
        } else if lower.contains("password") {
            AuthError::WeakPassword(message.to_string())
        } else {
            AuthError::Service(message.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_with_token() {
        let text = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "user": {
                "id": "37e55044-10b1-426f-9247-bb680e5fe0c8",
                "email": "student@university.edu",
                "user_metadata": {"full_name": "Sam Tran"}
            }
        }"#;

        let session = AuthClient::parse_session(text).unwrap();
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.user.email.as_str(), "student@university.edu");
        assert_eq!(session.user.full_name.as_deref(), Some("Sam Tran"));
    }

    #[test]
    fn test_parse_session_without_token_needs_confirmation() {
        let text = r#"{
            "id": "37e55044-10b1-426f-9247-bb680e5fe0c8",
            "email": "student@university.edu"
        }"#;

        assert!(matches!(
            AuthClient::parse_session(text),
            Err(AuthError::ConfirmationRequired)
        ));
    }

    #[test]
    fn test_classify_sign_up_errors() {
        assert!(matches!(
            AuthClient::classify_sign_up_error("User already registered"),
            AuthError::AlreadyRegistered
        ));
        assert!(matches!(
            AuthClient::classify_sign_up_error("Password should be at least 6 characters"),
            AuthError::WeakPassword(_)
        ));
        assert!(matches!(
            AuthClient::classify_sign_up_error("signups disabled"),
            AuthError::Service(_)
        ));
    }

    #[test]
    fn test_wire_error_message_priority() {
        let err: WireError =
            serde_json::from_str(r#"{"error_description": "bad", "msg": "other"}"#).unwrap();
        assert_eq!(err.message(), "bad");

        let err: WireError = serde_json::from_str(r"{}").unwrap();
        assert_eq!(err.message(), "unknown auth error");
    }
}
