//! Order history route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::backend::types::Order;
#[allow(unused_imports)]
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order line display data for templates.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub status: String,
    pub total: String,
    pub placed_at: String,
    pub store_name: Option<String>,
    pub store_location: Option<String>,
    pub special_instructions: Option<String>,
    pub items: Vec<OrderItemView>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            number: order.order_number,
            status: order.status.to_string(),
            total: order.total_amount.to_string(),
            placed_at: order.created_at.format("%b %-d, %Y %-I:%M %p").to_string(),
            store_name: order.store.as_ref().map(|s| s.name.clone()),
            store_location: order.store.as_ref().map(|s| s.location.clone()),
            special_instructions: order.special_instructions,
            items: order
                .order_items
                .into_iter()
                .map(|item| OrderItemView {
                    name: item
                        .food_item
                        .map_or_else(|| "Menu item".to_owned(), |f| f.name),
                    quantity: item.quantity,
                    unit_price: item.unit_price.to_string(),
                    subtotal: item.subtotal.to_string(),
                })
                .collect(),
        }
    }
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub user_name: String,
    pub orders: Vec<OrderView>,
    pub error: Option<String>,
}

/// Display the signed-in user's order history, newest first.
///
/// A backend failure renders a retryable banner rather than a 502.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let user_name = user.display_name().to_owned();

    match state.data().list_orders(&user).await {
        Ok(orders) => OrdersIndexTemplate {
            user_name,
            orders: orders.into_iter().map(OrderView::from).collect(),
            error: None,
        },
        Err(e) => {
            tracing::error!("Failed to load orders: {e}");
            OrdersIndexTemplate {
                user_name,
                orders: Vec::new(),
                error: Some("Could not load your orders. Please try again.".to_owned()),
            }
        }
    }
}
