//! Query construction for the backend's REST dialect.
//!
//! The backend filters collections with `column=eq.value` pairs, orders with
//! `order=column[.desc]`, and embeds related records through `select`
//! expressions such as `*,category:food_categories(name)`. This module
//! builds those query strings; [`super::DataClient`] executes them.

use std::fmt::Display;

/// A query against one backend collection.
///
/// Accumulates query-string parameters in insertion order so tests can
/// assert on the exact request shape.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: &'static str,
    params: Vec<(String, String)>,
}

impl SelectQuery {
    /// Start a query against `table`.
    #[must_use]
    pub const fn table(table: &'static str) -> Self {
        Self {
            table,
            params: Vec::new(),
        }
    }

    /// Choose returned columns, including embedded relations.
    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_owned(), columns.to_owned()));
        self
    }

    /// Add an equality filter on `column`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_owned(), format!("eq.{value}")));
        self
    }

    /// Order results by `expr` (e.g. `name` or `created_at.desc`).
    #[must_use]
    pub fn order(mut self, expr: &str) -> Self {
        self.params.push(("order".to_owned(), expr.to_owned()));
        self
    }

    /// Cap the number of returned rows.
    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".to_owned(), n.to_string()));
        self
    }

    /// The collection this query targets.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        self.table
    }

    /// The accumulated query-string parameters.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}
