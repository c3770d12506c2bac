//! Integration tests for Campus Eats.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-eats-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - Cart invariants exercised across whole ordering flows
//! - `checkout_orders` - Order payload building from cart state
//! - `backend_queries` - Query construction for the backend's REST dialect
//! - `order_status` - Order status lifecycle and serialization
//!
//! Everything here runs without a network: the backend clients are only
//! exercised up to the request-shape boundary, which is where this
//! codebase's responsibility ends.

pub mod helpers;
