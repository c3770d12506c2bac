//! Session-related types.
//!
//! Types stored in the session: the signed-in user and the cart.

use serde::{Deserialize, Serialize};

use campus_eats_core::{Email, UserId};

/// Session-stored user identity.
///
/// Carries the access token issued by the hosted auth service so order
/// reads/writes can run under the user's row-level permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's stable ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name from the sign-up profile, if given.
    pub full_name: Option<String>,
    /// Bearer token for backend calls scoped to this user.
    pub access_token: String,
}

impl CurrentUser {
    /// Name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or_else(|| self.email.as_str())
    }
}

/// Session keys for stored state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the cart.
    pub const CART: &str = "cart";
}
