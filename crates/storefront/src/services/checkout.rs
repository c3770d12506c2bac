//! Checkout orchestration.
//!
//! Translates a non-empty cart plus an optional customer note into one
//! order submission against the backend, then clears the cart on
//! acknowledged success.
//!
//! The order payload is built by pure functions so the totals and line
//! mapping are testable without a network; [`submit`] is the thin async
//! shell around them. Failures leave the cart untouched - a retry is the
//! user clicking the button again, never automatic.

use rand::distr::{Alphanumeric, SampleString};
use thiserror::Error;
use tracing::instrument;

use campus_eats_core::{OrderId, OrderStatus};

use crate::backend::types::{NewOrder, NewOrderItem, Order};
use crate::backend::{BackendError, DataClient};
use crate::cart::Cart;
use crate::models::CurrentUser;

/// Errors that can occur during checkout submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing in the cart to submit.
    #[error("cannot submit an empty cart")]
    EmptyCart,

    /// The backend rejected or failed the submission; the cart is intact
    /// and the user may retry.
    #[error("order submission failed: {0}")]
    Backend(#[from] BackendError),
}

/// Build the order row for a cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn build_order(
    cart: &Cart,
    user: &CurrentUser,
    special_instructions: Option<String>,
) -> Result<NewOrder, CheckoutError> {
    let Some(store_id) = cart.store_id() else {
        return Err(CheckoutError::EmptyCart);
    };

    let special_instructions =
        special_instructions.and_then(|s| (!s.trim().is_empty()).then(|| s.trim().to_owned()));

    Ok(NewOrder {
        order_number: generate_order_number(),
        customer_id: user.id,
        store_id,
        status: OrderStatus::Pending,
        total_amount: cart.total(),
        special_instructions,
    })
}

/// Build the line rows for a cart, attached to an already created order.
#[must_use]
pub fn build_order_items(cart: &Cart, order_id: OrderId) -> Vec<NewOrderItem> {
    cart.lines()
        .iter()
        .map(|line| NewOrderItem {
            order_id,
            food_item_id: line.item.id,
            quantity: line.quantity,
            unit_price: line.item.price,
            subtotal: line.subtotal,
        })
        .collect()
}

/// Submit the cart as an order and clear it on success.
///
/// The caller must hold an authenticated user; redirecting anonymous
/// visitors to the sign-in flow happens at the route layer.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart or
/// [`CheckoutError::Backend`] if either insert fails. The cart is only
/// cleared after both inserts are acknowledged.
#[instrument(skip_all, fields(user_id = %user.id, items = cart.lines().len()))]
pub async fn submit(
    data: &DataClient,
    cart: &mut Cart,
    user: &CurrentUser,
    special_instructions: Option<String>,
) -> Result<Order, CheckoutError> {
    let new_order = build_order(cart, user, special_instructions)?;

    let order = data.create_order(user, &new_order).await?;
    let items = build_order_items(cart, order.id);
    data.create_order_items(user, &items).await?;

    cart.clear();
    tracing::info!(order_number = %order.order_number, "order submitted");

    Ok(order)
}

/// Generate a short human-readable order number.
fn generate_order_number() -> String {
    let suffix = Alphanumeric
        .sample_string(&mut rand::rng(), 8)
        .to_uppercase();
    format!("ORD-{suffix}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use campus_eats_core::{Email, FoodItemId, Price, StoreId, UserId};

    use super::*;
    use crate::backend::types::FoodItem;

    fn user() -> CurrentUser {
        CurrentUser {
            id: UserId::new(Uuid::from_u128(7)),
            email: Email::parse("student@university.edu").unwrap(),
            full_name: None,
            access_token: "token".to_owned(),
        }
    }

    fn item(id: u128, cents: i64) -> FoodItem {
        FoodItem {
            id: FoodItemId::new(Uuid::from_u128(id)),
            store_id: StoreId::new(Uuid::from_u128(1)),
            category_id: None,
            name: format!("item-{id}"),
            description: None,
            price: Price::from_cents(cents),
            image_url: None,
            is_available: true,
            preparation_time: None,
            category: None,
        }
    }

    #[test]
    fn test_build_order_empty_cart() {
        let cart = Cart::default();
        assert!(matches!(
            build_order(&cart, &user(), None),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_build_order_totals_and_status() {
        let mut cart = Cart::default();
        cart.add_item(&item(10, 650), 2).unwrap();
        cart.add_item(&item(11, 320), 1).unwrap();

        let order = build_order(&cart, &user(), Some("no onions".to_owned())).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Price::from_cents(1620));
        assert_eq!(order.store_id, cart.store_id().unwrap());
        assert_eq!(order.special_instructions.as_deref(), Some("no onions"));
    }

    #[test]
    fn test_build_order_blank_instructions_dropped() {
        let mut cart = Cart::default();
        cart.add_item(&item(10, 650), 1).unwrap();

        let order = build_order(&cart, &user(), Some("   ".to_owned())).unwrap();
        assert_eq!(order.special_instructions, None);
    }

    #[test]
    fn test_build_order_items_mirror_lines() {
        let mut cart = Cart::default();
        cart.add_item(&item(10, 650), 2).unwrap();
        cart.add_item(&item(11, 320), 3).unwrap();

        let order_id = OrderId::new(Uuid::from_u128(42));
        let items = build_order_items(&cart, order_id);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.order_id == order_id));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal, Price::from_cents(1300));
        assert_eq!(items[1].unit_price, Price::from_cents(320));
        assert_eq!(items[1].subtotal, Price::from_cents(960));
    }

    #[test]
    fn test_generate_order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 12);
        assert!(
            number
                .trim_start_matches("ORD-")
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        );
    }
}
