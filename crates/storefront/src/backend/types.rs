//! Domain types for the backend data service.
//!
//! These mirror the field shapes of the hosted collections. All of them
//! deserialize straight from the backend's JSON; the insert payloads
//! (`NewOrder`, `NewOrderItem`) serialize back the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_eats_core::{
    CategoryId, FoodItemId, OrderId, OrderItemId, OrderStatus, Price, StoreId, UserId,
};

// =============================================================================
// Catalog Types
// =============================================================================

/// A campus store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Store ID.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    /// Optional blurb shown on listing cards.
    pub description: Option<String>,
    /// Campus location (building / hall).
    pub location: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Header image URL.
    pub image_url: Option<String>,
    /// Whether the store is currently taking orders.
    pub is_active: bool,
    /// Whether campus administration has approved the store.
    pub is_approved: bool,
}

/// A menu category (shared across stores).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Embedded category name on a menu item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category display name.
    pub name: String,
}

/// A single menu item. Immutable from the cart's perspective; the cart
/// stores a snapshot of this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Item ID.
    pub id: FoodItemId,
    /// Owning store.
    pub store_id: StoreId,
    /// Owning category, if any.
    pub category_id: Option<CategoryId>,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Item image URL.
    pub image_url: Option<String>,
    /// Whether the item can currently be ordered.
    pub is_available: bool,
    /// Preparation time estimate in minutes.
    pub preparation_time: Option<u32>,
    /// Embedded category name (present when the query asks for it).
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

// =============================================================================
// Order Types
// =============================================================================

/// Insert payload for the `orders` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    /// Human-readable order number.
    pub order_number: String,
    /// The ordering customer.
    pub customer_id: UserId,
    /// The store the order was placed with.
    pub store_id: StoreId,
    /// Always [`OrderStatus::Pending`] on submission.
    pub status: OrderStatus,
    /// Sum of all line subtotals at submission time.
    pub total_amount: Price,
    /// Free-form customer note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Insert payload for the `order_items` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    /// Parent order.
    pub order_id: OrderId,
    /// The ordered menu item.
    pub food_item_id: FoodItemId,
    /// Ordered quantity.
    pub quantity: u32,
    /// Price per unit at submission time.
    pub unit_price: Price,
    /// `quantity x unit_price` at submission time.
    pub subtotal: Price,
}

/// Embedded store columns on an order row.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStoreRef {
    /// Store display name.
    pub name: String,
    /// Campus location.
    pub location: String,
}

/// Embedded menu item columns on an order item row.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderFoodItemRef {
    /// Item display name at read time.
    pub name: String,
    /// Item description at read time.
    pub description: Option<String>,
}

/// One line of a submitted order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    /// Row ID.
    pub id: OrderItemId,
    /// Parent order.
    pub order_id: OrderId,
    /// The ordered menu item.
    pub food_item_id: FoodItemId,
    /// Ordered quantity.
    pub quantity: u32,
    /// Price per unit at submission time.
    pub unit_price: Price,
    /// Line subtotal at submission time.
    pub subtotal: Price,
    /// Embedded item details (present in history queries).
    #[serde(default)]
    pub food_item: Option<OrderFoodItemRef>,
}

/// A submitted order.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// The ordering customer.
    pub customer_id: UserId,
    /// The store the order was placed with.
    pub store_id: StoreId,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Total at submission time.
    pub total_amount: Price,
    /// Free-form customer note.
    pub special_instructions: Option<String>,
    /// Agreed collection time, once the store sets one.
    pub pickup_time: Option<DateTime<Utc>>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Embedded store details (present in history queries).
    #[serde(default)]
    pub store: Option<OrderStoreRef>,
    /// Embedded order lines (present in history queries).
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_food_item_deserializes_without_embed() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "store_id": "17e55044-10b1-426f-9247-bb680e5fe0c8",
            "category_id": null,
            "name": "Halloumi Wrap",
            "description": null,
            "price": 6.5,
            "image_url": null,
            "is_available": true,
            "preparation_time": 10
        }"#;

        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Halloumi Wrap");
        assert_eq!(item.price, Price::from_cents(650));
        assert!(item.category.is_none());
    }

    #[test]
    fn test_food_item_deserializes_with_embed() {
        let json = r#"{
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "store_id": "17e55044-10b1-426f-9247-bb680e5fe0c8",
            "category_id": "27e55044-10b1-426f-9247-bb680e5fe0c8",
            "name": "Halloumi Wrap",
            "description": "Grilled halloumi, flatbread",
            "price": "6.50",
            "image_url": null,
            "is_available": true,
            "preparation_time": 10,
            "category": {"name": "Wraps"}
        }"#;

        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category.unwrap().name, "Wraps");
    }

    #[test]
    fn test_new_order_serializes_status_snake_case() {
        let order = NewOrder {
            order_number: "ORD-A1B2C3D4".to_owned(),
            customer_id: UserId::parse("37e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            store_id: StoreId::parse("17e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            status: OrderStatus::Pending,
            total_amount: Price::from_cents(1500),
            special_instructions: None,
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["total_amount"], "15.00");
        // Omitted entirely rather than sent as null.
        assert!(value.get("special_instructions").is_none());
    }

    #[test]
    fn test_order_deserializes_history_row() {
        let json = r#"{
            "id": "47e55044-10b1-426f-9247-bb680e5fe0c8",
            "order_number": "ORD-A1B2C3D4",
            "customer_id": "37e55044-10b1-426f-9247-bb680e5fe0c8",
            "store_id": "17e55044-10b1-426f-9247-bb680e5fe0c8",
            "status": "preparing",
            "total_amount": 15.0,
            "special_instructions": "no onions",
            "pickup_time": null,
            "created_at": "2024-11-02T10:30:00+00:00",
            "store": {"name": "Healthy Bites", "location": "Student Union"},
            "order_items": [{
                "id": "57e55044-10b1-426f-9247-bb680e5fe0c8",
                "order_id": "47e55044-10b1-426f-9247-bb680e5fe0c8",
                "food_item_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "quantity": 3,
                "unit_price": 5.0,
                "subtotal": 15.0,
                "food_item": {"name": "Halloumi Wrap", "description": null}
            }]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.store.unwrap().name, "Healthy Bites");
        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.order_items[0].quantity, 3);
    }

    #[test]
    fn test_order_deserializes_insert_response() {
        // Insert responses carry no embedded relations.
        let json = r#"{
            "id": "47e55044-10b1-426f-9247-bb680e5fe0c8",
            "order_number": "ORD-A1B2C3D4",
            "customer_id": "37e55044-10b1-426f-9247-bb680e5fe0c8",
            "store_id": "17e55044-10b1-426f-9247-bb680e5fe0c8",
            "status": "pending",
            "total_amount": 15.0,
            "special_instructions": null,
            "pickup_time": null,
            "created_at": "2024-11-02T10:30:00+00:00"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.store.is_none());
        assert!(order.order_items.is_empty());
    }
}
