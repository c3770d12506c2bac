//! Landing page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

#[allow(unused_imports)]
use crate::filters;
use crate::state::AppState;

/// Store card data for the landing page preview.
#[derive(Clone)]
pub struct StorePreviewView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub image_url: Option<String>,
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub stores: Vec<StorePreviewView>,
}

/// Display the landing page.
///
/// The stores preview is best-effort: a backend failure renders the page
/// without it rather than erroring the whole landing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let stores = match state.data().list_stores().await {
        Ok(stores) => stores
            .into_iter()
            .take(3)
            .map(|s| StorePreviewView {
                id: s.id.to_string(),
                name: s.name,
                description: s.description,
                location: s.location,
                image_url: s.image_url,
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to load stores preview: {e}");
            Vec::new()
        }
    };

    HomeTemplate { stores }
}
