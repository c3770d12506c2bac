//! Order status lifecycle and serialization.
//!
//! The backend owns all status transitions; the storefront only needs to
//! submit `pending` and faithfully render whatever comes back.

#![allow(clippy::unwrap_used)]

use campus_eats_core::OrderStatus;

#[test]
fn all_statuses_roundtrip_through_serde() {
    for status in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ] {
        let json = serde_json::to_string(&status).unwrap();
        let parsed: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn statuses_match_backend_column_values() {
    // These strings are the backend's enum values; renaming a variant
    // without a backend migration would break order history.
    assert_eq!(
        serde_json::to_string(&OrderStatus::Pending).unwrap(),
        "\"pending\""
    );
    assert_eq!(
        serde_json::to_string(&OrderStatus::Preparing).unwrap(),
        "\"preparing\""
    );
    assert_eq!(
        serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
        "\"cancelled\""
    );
}

#[test]
fn unknown_status_fails_to_parse() {
    assert!(serde_json::from_str::<OrderStatus>("\"collected\"").is_err());
}

#[test]
fn submission_status_is_pending_and_open() {
    let status = OrderStatus::default();
    assert_eq!(status, OrderStatus::Pending);
    assert!(status.is_open());
}

#[test]
fn terminal_statuses_are_not_open() {
    assert!(!OrderStatus::Completed.is_open());
    assert!(!OrderStatus::Cancelled.is_open());

    for status in [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ] {
        assert!(status.is_open());
    }
}
