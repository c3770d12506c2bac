//! Cart and checkout route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; every mutation loads it, applies
//! one cart operation, and writes it back before responding.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use campus_eats_core::FoodItemId;

use crate::cart::{Cart, CartError};
use crate::error::set_sentry_user;
#[allow(unused_imports)]
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::services::checkout;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: String,
    pub quantity: u32,
    pub line_price: String,
    /// Quantity for the "-" button; zero removes the line.
    pub dec_quantity: u32,
    /// Quantity for the "+" button.
    pub inc_quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    id: line.item.id.to_string(),
                    name: line.item.name.clone(),
                    description: line.item.description.clone(),
                    unit_price: line.item.price.to_string(),
                    quantity: line.quantity,
                    line_price: line.subtotal.to_string(),
                    dec_quantity: line.quantity.saturating_sub(1),
                    inc_quantity: line.quantity.saturating_add(1),
                })
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Store summary shown above the cart lines.
#[derive(Clone)]
pub struct CartStoreView {
    pub id: String,
    pub name: String,
    pub location: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to empty.
async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(session_keys::CART, cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub special_instructions: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub store: Option<CartStoreView>,
    pub error: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Best-effort store summary for the cart page header.
async fn cart_store(state: &AppState, cart: &Cart) -> Option<CartStoreView> {
    let store_id = cart.store_id()?;
    match state.data().get_store(store_id).await {
        Ok(store) => Some(CartStoreView {
            id: store.id.to_string(),
            name: store.name,
            location: store.location,
        }),
        Err(e) => {
            tracing::warn!("Failed to fetch store {store_id} for cart page: {e}");
            None
        }
    }
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let store = cart_store(&state, &cart).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
        store,
        error: None,
    }
}

/// Add item to cart (HTMX).
///
/// Re-fetches the menu item so the cart snapshots the backend's current
/// price. Returns the cart count badge with an HTMX trigger so other
/// fragments refresh themselves.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let Ok(item_id) = FoodItemId::parse(&form.item_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<span class=\"cart-error\">Unknown item</span>"),
        )
            .into_response();
    };

    let item = match state.data().get_food_item(item_id).await {
        Ok(item) => item,
        Err(e) => {
            tracing::error!("Failed to fetch item {item_id} for cart add: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"cart-error\">Error adding to cart</span>"),
            )
                .into_response();
        }
    };

    let mut cart = load_cart(&session).await;
    match cart.add_item(&item, form.quantity.unwrap_or(1)) {
        Ok(()) => {
            save_cart(&session, &cart).await;
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartCountTemplate {
                    count: cart.item_count(),
                },
            )
                .into_response()
        }
        Err(CartError::CrossStoreConflict { .. }) => (
            StatusCode::CONFLICT,
            Html("<span class=\"cart-error\">You can only order from one store at a time. Clear your cart to switch stores.</span>"),
        )
            .into_response(),
    }
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero removes the line; an unknown item id is a no-op.
#[instrument(skip_all)]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let mut cart = load_cart(&session).await;

    // Stale ids from a re-rendered page are tolerated as no-ops.
    if let Ok(item_id) = FoodItemId::parse(&form.item_id) {
        cart.update_quantity(item_id, form.quantity);
        save_cart(&session, &cart).await;
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip_all)]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut cart = load_cart(&session).await;

    if let Ok(item_id) = FoodItemId::parse(&form.item_id) {
        cart.remove_item(item_id);
        save_cart(&session, &cart).await;
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Clear the whole cart (HTMX).
#[instrument(skip_all)]
pub async fn clear(session: Session) -> Response {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}

/// Submit the cart as an order.
///
/// Anonymous visitors are redirected to the sign-in flow with the cart
/// intact. On success the cleared cart is saved and the user lands on
/// their order history; on failure the cart page re-renders with a
/// retryable error and nothing is lost.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let Some(user) = user else {
        return Redirect::to("/auth/login").into_response();
    };
    set_sentry_user(&user.id, Some(user.email.as_str()));

    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    match checkout::submit(state.data(), &mut cart, &user, form.special_instructions).await {
        Ok(order) => {
            save_cart(&session, &cart).await;
            tracing::info!(order_number = %order.order_number, "checkout complete");
            Redirect::to("/orders").into_response()
        }
        Err(e) => {
            tracing::error!("Checkout failed: {e}");
            let store = cart_store(&state, &cart).await;
            CartShowTemplate {
                cart: CartView::from(&cart),
                store,
                error: Some("We couldn't place your order. Please try again.".to_owned()),
            }
            .into_response()
        }
    }
}
