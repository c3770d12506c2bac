//! The in-memory shopping cart.
//!
//! A [`Cart`] accumulates menu item snapshots for exactly one store. It is
//! the only mutable state this codebase owns: everything durable lives in
//! the backend, while the cart is constructed empty per browser session,
//! serialized into the session between requests, and dropped when the
//! session ends.
//!
//! # Invariants
//!
//! - All lines in a non-empty cart reference the same store.
//! - At most one line per menu item; re-adding an item grows its quantity.
//! - Every line has quantity >= 1. Mutations that would leave a line at
//!   zero remove the line instead.
//!
//! Mutations are deliberately tolerant: removing an absent item or updating
//! an unknown id is a no-op, so stale references from a re-rendered page
//! never crash the session. The single error case is adding an item from a
//! different store, which returns [`CartError::CrossStoreConflict`] and
//! leaves the cart untouched - the view layer owns whatever confirmation
//! flow follows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use campus_eats_core::{FoodItemId, Price, StoreId};

use crate::backend::types::FoodItem;

/// Errors returned by cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cart holds items from one store and the caller tried to add an
    /// item from another.
    #[error("cart holds items from another store")]
    CrossStoreConflict {
        /// The store the cart currently belongs to.
        in_cart: StoreId,
        /// The store of the rejected item.
        attempted: StoreId,
    },
}

/// One menu item entry in the cart.
///
/// Holds a snapshot of the item as it was when last added, so the cart page
/// can render name/description/price without refetching the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the menu item.
    pub item: FoodItem,
    /// Ordered quantity, always >= 1.
    pub quantity: u32,
    /// `quantity x item.price`, recomputed on every mutation.
    pub subtotal: Price,
}

/// The cart state for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    store_id: Option<StoreId>,
}

impl Cart {
    /// Add `quantity` of `item` to the cart.
    ///
    /// If a line for this item already exists its quantity grows and the
    /// stored snapshot is refreshed, so a price changed server-side since
    /// the first add wins. A zero quantity is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CrossStoreConflict`] without mutating anything
    /// when the cart is non-empty and `item` belongs to a different store.
    pub fn add_item(&mut self, item: &FoodItem, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        if let Some(in_cart) = self.store_id
            && in_cart != item.store_id
        {
            return Err(CartError::CrossStoreConflict {
                in_cart,
                attempted: item.store_id,
            });
        }

        self.store_id = Some(item.store_id);

        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            line.quantity += quantity;
            line.item = item.clone();
            line.subtotal = item.price.times(line.quantity);
        } else {
            self.lines.push(CartLine {
                quantity,
                subtotal: item.price.times(quantity),
                item: item.clone(),
            });
        }

        Ok(())
    }

    /// Remove the line for `item_id` if present.
    ///
    /// Removing the last line clears the store association, so the next
    /// `add_item` may come from any store.
    pub fn remove_item(&mut self, item_id: FoodItemId) {
        self.lines.retain(|l| l.item.id != item_id);
        if self.lines.is_empty() {
            self.store_id = None;
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero behaves exactly like [`Self::remove_item`]. An
    /// unknown `item_id` is a no-op; no line is created.
    pub fn update_quantity(&mut self, item_id: FoodItemId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item_id) {
            line.quantity = quantity;
            line.subtotal = line.item.price.times(quantity);
        }
    }

    /// Empty the cart and clear the store association. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.store_id = None;
    }

    /// Sum of all line subtotals.
    ///
    /// Recomputed from the lines on every call rather than maintained
    /// incrementally; line counts are bounded by a single store's menu.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|l| l.subtotal).sum()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The store all current lines belong to; `None` while empty.
    #[must_use]
    pub const fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn store(n: u128) -> StoreId {
        StoreId::new(Uuid::from_u128(n))
    }

    fn item(id: u128, store_id: StoreId, name: &str, cents: i64) -> FoodItem {
        FoodItem {
            id: FoodItemId::new(Uuid::from_u128(id)),
            store_id,
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

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.store_id(), None);
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_accumulates_count_and_total() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);
        let coffee = item(11, s1, "Flat White", 320);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 2).unwrap();
        cart.add_item(&coffee, 1).unwrap();
        cart.add_item(&wrap, 1).unwrap();

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), Price::from_cents(650 * 3 + 320));
        // Re-adding merged into one line rather than creating a second.
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.store_id(), Some(s1));
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 0).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.store_id(), None);
    }

    #[test]
    fn test_cross_store_conflict_leaves_cart_unchanged() {
        let s1 = store(1);
        let s2 = store(2);
        let wrap = item(10, s1, "Halloumi Wrap", 650);
        let burrito = item(20, s2, "Bean Burrito", 700);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 2).unwrap();
        let before = cart.clone();

        let err = cart.add_item(&burrito, 1).unwrap_err();
        assert_eq!(
            err,
            CartError::CrossStoreConflict {
                in_cart: s1,
                attempted: s2,
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_item() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);
        let coffee = item(11, s1, "Flat White", 320);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 1).unwrap();
        cart.add_item(&coffee, 1).unwrap();

        cart.remove_item(wrap.id);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.store_id(), Some(s1));

        // Removing an absent id is a no-op, not an error.
        cart.remove_item(wrap.id);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_removing_last_line_clears_store() {
        let s1 = store(1);
        let s2 = store(2);
        let wrap = item(10, s1, "Halloumi Wrap", 650);
        let burrito = item(20, s2, "Bean Burrito", 700);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 3).unwrap();
        cart.remove_item(wrap.id);

        assert!(cart.is_empty());
        assert_eq!(cart.store_id(), None);

        // A fresh cart accepts any store again.
        cart.add_item(&burrito, 1).unwrap();
        assert_eq!(cart.store_id(), Some(s2));
    }

    #[test]
    fn test_update_quantity() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 1).unwrap();

        cart.update_quantity(wrap.id, 4);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), Price::from_cents(2600));
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);

        let mut removed = Cart::default();
        removed.add_item(&wrap, 2).unwrap();
        removed.remove_item(wrap.id);

        let mut updated = Cart::default();
        updated.add_item(&wrap, 2).unwrap();
        updated.update_quantity(wrap.id, 0);

        assert_eq!(removed, updated);
        assert_eq!(updated.store_id(), None);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);
        let ghost = FoodItemId::new(Uuid::from_u128(999));

        let mut cart = Cart::default();
        cart.add_item(&wrap, 2).unwrap();
        let before = cart.clone();

        cart.update_quantity(ghost, 5);
        assert_eq!(cart, before);

        // Zero for an unknown id is equally a no-op.
        cart.update_quantity(ghost, 0);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 2).unwrap();

        cart.clear();
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.store_id(), None);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_re_add_refreshes_price_snapshot() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 1).unwrap();

        // Menu price changed server-side between adds; latest snapshot wins
        // for the whole line.
        let mut repriced = wrap.clone();
        repriced.price = Price::from_cents(700);
        cart.add_item(&repriced, 1).unwrap();

        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].subtotal, Price::from_cents(1400));
        assert_eq!(cart.total(), Price::from_cents(1400));
    }

    #[test]
    fn test_checkout_scenario() {
        let s1 = store(1);
        let s2 = store(2);
        let x = item(10, s1, "X", 500);
        let y = item(20, s2, "Y", 300);

        let mut cart = Cart::default();

        cart.add_item(&x, 1).unwrap();
        assert_eq!(cart.total(), Price::from_cents(500));

        cart.add_item(&x, 2).unwrap();
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].subtotal, Price::from_cents(1500));
        assert_eq!(cart.total(), Price::from_cents(1500));

        assert!(cart.add_item(&y, 1).is_err());
        assert_eq!(cart.total(), Price::from_cents(1500));

        cart.update_quantity(x.id, 0);
        assert!(cart.is_empty());
        assert_eq!(cart.store_id(), None);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_serde_roundtrip() {
        let s1 = store(1);
        let wrap = item(10, s1, "Halloumi Wrap", 650);

        let mut cart = Cart::default();
        cart.add_item(&wrap, 2).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
