//! Shared fixtures for the integration tests.

use uuid::Uuid;

use campus_eats_core::{Email, FoodItemId, Price, StoreId, UserId};
use campus_eats_storefront::backend::types::FoodItem;
use campus_eats_storefront::models::CurrentUser;

/// A deterministic store id.
#[must_use]
pub fn store_id(n: u128) -> StoreId {
    StoreId::new(Uuid::from_u128(n))
}

/// A menu item fixture belonging to `store`.
#[must_use]
pub fn menu_item(id: u128, store: StoreId, name: &str, cents: i64) -> FoodItem {
    FoodItem {
        id: FoodItemId::new(Uuid::from_u128(id)),
        store_id: store,
        category_id: None,
        name: name.to_owned(),
        description: None,
        price: Price::from_cents(cents),
        image_url: None,
        is_available: true,
        preparation_time: Some(10),
        category: None,
    }
}

/// A signed-in user fixture.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn current_user() -> CurrentUser {
    CurrentUser {
        id: UserId::new(Uuid::from_u128(0xA11CE)),
        email: Email::parse("student@university.edu").expect("fixture email is valid"),
        full_name: Some("Alice Wu".to_owned()),
        access_token: "test-access-token".to_owned(),
    }
}
