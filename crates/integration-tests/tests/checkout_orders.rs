//! Order payload building from cart state.
//!
//! Checkout submission is two inserts against the backend; everything
//! this codebase decides (totals, line mapping, order number, status)
//! happens in the pure builders tested here.

#![allow(clippy::unwrap_used)]

use uuid::Uuid;

use campus_eats_core::{OrderId, OrderStatus, Price};
use campus_eats_integration_tests::helpers::{current_user, menu_item, store_id};
use campus_eats_storefront::cart::Cart;
use campus_eats_storefront::services::checkout::{CheckoutError, build_order, build_order_items};

#[test]
fn order_totals_match_cart() {
    let s1 = store_id(1);
    let mut cart = Cart::default();
    cart.add_item(&menu_item(10, s1, "Halloumi Wrap", 650), 2)
        .unwrap();
    cart.add_item(&menu_item(11, s1, "Flat White", 320), 1)
        .unwrap();

    let user = current_user();
    let order = build_order(&cart, &user, None).unwrap();

    assert_eq!(order.customer_id, user.id);
    assert_eq!(order.store_id, s1);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, cart.total());
    assert_eq!(order.total_amount, Price::from_cents(1620));
}

#[test]
fn order_number_is_generated_per_order() {
    let s1 = store_id(1);
    let mut cart = Cart::default();
    cart.add_item(&menu_item(10, s1, "Halloumi Wrap", 650), 1)
        .unwrap();
    let user = current_user();

    let first = build_order(&cart, &user, None).unwrap();
    let second = build_order(&cart, &user, None).unwrap();

    for order in [&first, &second] {
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.order_number.len(), 12);
    }
    // Random suffixes; two submissions must not share a number.
    assert_ne!(first.order_number, second.order_number);
}

#[test]
fn empty_cart_cannot_be_submitted() {
    let cart = Cart::default();
    assert!(matches!(
        build_order(&cart, &current_user(), None),
        Err(CheckoutError::EmptyCart)
    ));
}

#[test]
fn line_items_carry_submission_time_prices() {
    let s1 = store_id(1);
    let wrap = menu_item(10, s1, "Halloumi Wrap", 650);

    let mut cart = Cart::default();
    cart.add_item(&wrap, 1).unwrap();

    // Price changes between the first add and a later one; the refreshed
    // snapshot is what gets submitted.
    let mut repriced = wrap.clone();
    repriced.price = Price::from_cents(700);
    cart.add_item(&repriced, 1).unwrap();

    let order_id = OrderId::new(Uuid::from_u128(77));
    let items = build_order_items(&cart, order_id);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].order_id, order_id);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].unit_price, Price::from_cents(700));
    assert_eq!(items[0].subtotal, Price::from_cents(1400));
}

#[test]
fn special_instructions_are_trimmed_or_dropped() {
    let s1 = store_id(1);
    let mut cart = Cart::default();
    cart.add_item(&menu_item(10, s1, "Halloumi Wrap", 650), 1)
        .unwrap();
    let user = current_user();

    let noted = build_order(&cart, &user, Some("  extra napkins  ".to_owned())).unwrap();
    assert_eq!(noted.special_instructions.as_deref(), Some("extra napkins"));

    let blank = build_order(&cart, &user, Some("   ".to_owned())).unwrap();
    assert_eq!(blank.special_instructions, None);

    let none = build_order(&cart, &user, None).unwrap();
    assert_eq!(none.special_instructions, None);
}

#[test]
fn order_insert_payload_shape() {
    let s1 = store_id(1);
    let mut cart = Cart::default();
    cart.add_item(&menu_item(10, s1, "Halloumi Wrap", 650), 3)
        .unwrap();

    let order = build_order(&cart, &current_user(), Some("no onions".to_owned())).unwrap();
    let value = serde_json::to_value(&order).unwrap();

    assert_eq!(value["status"], "pending");
    assert_eq!(value["special_instructions"], "no onions");
    assert_eq!(value["total_amount"], "19.50");
    assert!(value["order_number"].as_str().unwrap().starts_with("ORD-"));

    let items = build_order_items(&cart, OrderId::new(Uuid::from_u128(5)));
    let value = serde_json::to_value(&items).unwrap();
    assert_eq!(value[0]["quantity"], 3);
    assert_eq!(value[0]["unit_price"], "6.50");
    assert_eq!(value[0]["subtotal"], "19.50");
}
