//! Campus Eats Core - Shared types library.
//!
//! This crate provides common types used across all Campus Eats components:
//! - `storefront` - Public-facing pre-ordering site
//! - `integration-tests` - Cross-crate test suite
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. All durable records (stores, menu items, orders) live in the
//! hosted backend; this crate gives them type-safe identifiers, money, and
//! status representations.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
