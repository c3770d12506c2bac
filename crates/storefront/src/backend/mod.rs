//! Clients for the hosted backend (data + auth).
//!
//! # Architecture
//!
//! - The backend exposes a PostgREST-style REST dialect over the durable
//!   collections (`stores`, `food_items`, `food_categories`, `orders`,
//!   `order_items`) and a token-based auth endpoint.
//! - The backend is the source of truth - NO local sync, direct API calls.
//! - Every read is a fresh query; there is no local cache to invalidate.
//!
//! # Clients
//!
//! ## [`DataClient`]
//! - Store list, per-store menus, order submission and history
//! - Anon API key for catalog reads, user bearer token for order operations
//!
//! ## [`AuthClient`]
//! - Password sign-up / sign-in / sign-out against the hosted auth service
//! - Returns an access token + user identity for the session
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_eats_storefront::backend::DataClient;
//!
//! let data = DataClient::new(&config.backend);
//!
//! // Browse the catalog
//! let stores = data.list_stores().await?;
//! let (items, categories) = data.list_menu(stores[0].id).await?;
//! ```

mod auth;
mod data;
pub mod query;
pub mod types;

pub use auth::{AuthClient, AuthError, AuthSession, AuthUser};
pub use data::DataClient;

use thiserror::Error;

/// Errors that can occur when talking to the backend data service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The backend rejected the request.
    #[error("backend error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error body, truncated for logging.
        message: String,
    },
}
