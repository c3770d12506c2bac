//! Store listing and menu route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use campus_eats_core::StoreId;

use crate::backend::types::{FoodCategory, FoodItem, Store};
use crate::error::{AppError, Result};
#[allow(unused_imports)]
use crate::filters;
use crate::state::AppState;

/// Store display data for templates.
#[derive(Clone)]
pub struct StoreView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

impl From<Store> for StoreView {
    fn from(store: Store) -> Self {
        Self {
            id: store.id.to_string(),
            name: store.name,
            description: store.description,
            location: store.location,
            phone: store.phone,
            image_url: store.image_url,
        }
    }
}

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub preparation_time: Option<u32>,
}

impl From<&FoodItem> for MenuItemView {
    fn from(item: &FoodItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            preparation_time: item.preparation_time,
        }
    }
}

/// A menu section: one category's items.
#[derive(Clone)]
pub struct MenuSection {
    pub name: String,
    pub items: Vec<MenuItemView>,
}

/// Group a store's menu items into sections by category name.
///
/// Sections follow the category listing order; items whose category was
/// deleted (or never set) land in a trailing "Other" section. Empty
/// sections are dropped.
fn group_menu(items: &[FoodItem], categories: &[FoodCategory]) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = categories
        .iter()
        .map(|category| MenuSection {
            name: category.name.clone(),
            items: items
                .iter()
                .filter(|item| {
                    item.category
                        .as_ref()
                        .is_some_and(|c| c.name == category.name)
                })
                .map(MenuItemView::from)
                .collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect();

    let uncategorized: Vec<MenuItemView> = items
        .iter()
        .filter(|item| item.category.is_none())
        .map(MenuItemView::from)
        .collect();
    if !uncategorized.is_empty() {
        sections.push(MenuSection {
            name: "Other".to_owned(),
            items: uncategorized,
        });
    }

    sections
}

/// Store listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/index.html")]
pub struct StoresIndexTemplate {
    pub stores: Vec<StoreView>,
    pub error: Option<String>,
}

/// Store detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/show.html")]
pub struct StoreShowTemplate {
    pub store: StoreView,
    pub sections: Vec<MenuSection>,
    pub error: Option<String>,
}

/// Display the store listing.
///
/// A backend failure renders a retryable error banner instead of a 502; no
/// partial list is shown.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    match state.data().list_stores().await {
        Ok(stores) => StoresIndexTemplate {
            stores: stores.into_iter().map(StoreView::from).collect(),
            error: None,
        },
        Err(e) => {
            tracing::error!("Failed to load stores: {e}");
            StoresIndexTemplate {
                stores: Vec::new(),
                error: Some("Could not load stores. Please try again.".to_owned()),
            }
        }
    }
}

/// Display a store's menu grouped by category.
#[instrument(skip(state), fields(store_id = %store_id))]
pub async fn show(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<StoreShowTemplate> {
    let store_id = StoreId::parse(&store_id)
        .map_err(|_| AppError::NotFound(format!("store not found: {store_id}")))?;

    let store = state.data().get_store(store_id).await?;

    // Menu failures keep the store header visible with a retryable banner.
    let (sections, error) = match state.data().list_menu(store_id).await {
        Ok((items, categories)) => (group_menu(&items, &categories), None),
        Err(e) => {
            tracing::error!("Failed to load menu for {store_id}: {e}");
            (
                Vec::new(),
                Some("Could not load the menu. Please try again.".to_owned()),
            )
        }
    };

    Ok(StoreShowTemplate {
        store: StoreView::from(store),
        sections,
        error,
    })
}
