//! Authentication route handlers.
//!
//! Thin pages over the hosted auth service: credentials go straight to the
//! backend, only the issued identity + token land in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use campus_eats_core::Email;

use crate::backend::AuthError;
use crate::error::{clear_sentry_user, set_sentry_user};
#[allow(unused_imports)]
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        error: None,
        notice: None,
    }
}

/// Store the issued session identity and tag Sentry with the user.
async fn establish_session(session: &Session, user: CurrentUser) {
    set_sentry_user(&user.id, Some(user.email.as_str()));
    if let Err(e) = set_current_user(session, &user).await {
        tracing::error!("Failed to store user in session: {e}");
    }
}

/// Handle a login attempt.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            return LoginTemplate {
                error: Some(e.to_string()),
            }
            .into_response();
        }
    };

    match state.auth().sign_in(&email, &form.password).await {
        Ok(auth) => {
            establish_session(
                &session,
                CurrentUser {
                    id: auth.user.id,
                    email: auth.user.email,
                    full_name: auth.user.full_name,
                    access_token: auth.access_token,
                },
            )
            .await;
            Redirect::to("/").into_response()
        }
        Err(AuthError::InvalidCredentials) => LoginTemplate {
            error: Some("Invalid email or password.".to_owned()),
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Sign-in failed: {e}");
            LoginTemplate {
                error: Some("Sign in is unavailable right now. Please try again.".to_owned()),
            }
            .into_response()
        }
    }
}

/// Handle a registration attempt.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => {
            return RegisterTemplate {
                error: Some(e.to_string()),
                notice: None,
            }
            .into_response();
        }
    };

    let full_name = form
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match state.auth().sign_up(&email, &form.password, full_name).await {
        Ok(auth) => {
            establish_session(
                &session,
                CurrentUser {
                    id: auth.user.id,
                    email: auth.user.email,
                    full_name: auth.user.full_name,
                    access_token: auth.access_token,
                },
            )
            .await;
            Redirect::to("/stores").into_response()
        }
        Err(AuthError::ConfirmationRequired) => RegisterTemplate {
            error: None,
            notice: Some("Account created. Check your inbox to confirm your email.".to_owned()),
        }
        .into_response(),
        Err(e @ (AuthError::AlreadyRegistered | AuthError::WeakPassword(_))) => RegisterTemplate {
            error: Some(e.to_string()),
            notice: None,
        }
        .into_response(),
        Err(e) => {
            tracing::error!("Sign-up failed: {e}");
            RegisterTemplate {
                error: Some("Registration is unavailable right now. Please try again.".to_owned()),
                notice: None,
            }
            .into_response()
        }
    }
}

/// Handle logout.
///
/// Revokes the token best-effort; the session is cleared either way.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    if let Ok(Some(user)) = session
        .get::<CurrentUser>(crate::models::session_keys::CURRENT_USER)
        .await
        && let Err(e) = state.auth().sign_out(&user.access_token).await
    {
        tracing::warn!("Token revocation failed: {e}");
    }

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session user: {e}");
    }
    clear_sentry_user();

    Redirect::to("/")
}
