//! Backend data service client.
//!
//! Wraps the hosted REST endpoint with typed catalog and order calls.
//! Catalog reads run under the anon API key; order reads and writes carry
//! the signed-in user's bearer token so the backend can scope rows to the
//! customer.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use campus_eats_core::{FoodItemId, StoreId};

use super::BackendError;
use super::query::SelectQuery;
use super::types::{FoodCategory, FoodItem, NewOrder, NewOrderItem, Order, OrderItem, Store};
use crate::config::BackendConfig;
use crate::models::CurrentUser;

/// Menu embed: item rows joined with their category name.
const MENU_SELECT: &str = "*,category:food_categories(name)";

/// History embed: order rows joined with store and line details.
const ORDER_HISTORY_SELECT: &str =
    "*,store:stores(name,location),order_items(*,food_item:food_items(name,description))";

/// Client for the backend data service.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct DataClient {
    inner: Arc<DataClientInner>,
}

struct DataClientInner {
    http: reqwest::Client,
    rest_url: String,
    anon_key: String,
}

impl DataClient {
    /// Create a new data service client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(DataClientInner {
                http: reqwest::Client::new(),
                rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a select query, returning all matching rows.
    async fn select<T: DeserializeOwned>(
        &self,
        query: &SelectQuery,
        token: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        let url = format!("{}/{}", self.inner.rest_url, query.collection());
        let response = self
            .inner
            .http
            .get(&url)
            .query(query.params())
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(token.unwrap_or(&self.inner.anon_key))
            .send()
            .await?;

        Self::read_rows(response).await
    }

    /// Insert rows into a collection, returning the created records.
    async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        collection: &str,
        body: &B,
        token: &str,
    ) -> Result<Vec<T>, BackendError> {
        let url = format!("{}/{}", self.inner.rest_url, collection);
        let response = self
            .inner
            .http
            .post(&url)
            .header("apikey", &self.inner.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        Self::read_rows(response).await
    }

    /// Check the response status and parse the row array.
    async fn read_rows<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, BackendError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(BackendError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            BackendError::Parse(e)
        })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Lightweight connectivity probe for the readiness endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or rejects the query.
    pub async fn ping(&self) -> Result<(), BackendError> {
        let query = SelectQuery::table("stores").select("id").limit(1);
        self.select::<serde_json::Value>(&query, None).await?;
        Ok(())
    }

    /// List all active, approved stores ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<Store>, BackendError> {
        let query = SelectQuery::table("stores")
            .select("*")
            .eq("is_active", true)
            .eq("is_approved", true)
            .order("name");

        self.select(&query, None).await
    }

    /// Get a single active, approved store.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] if the store does not exist or is
    /// not visible to customers, or another error if the request fails.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn get_store(&self, store_id: StoreId) -> Result<Store, BackendError> {
        let query = SelectQuery::table("stores")
            .select("*")
            .eq("id", store_id)
            .eq("is_active", true)
            .eq("is_approved", true)
            .limit(1);

        let stores: Vec<Store> = self.select(&query, None).await?;
        stores
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("store not found: {store_id}")))
    }

    /// Fetch a store's available menu items (with category names) plus the
    /// full category list, both ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails; no partial result is returned.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list_menu(
        &self,
        store_id: StoreId,
    ) -> Result<(Vec<FoodItem>, Vec<FoodCategory>), BackendError> {
        let items_query = SelectQuery::table("food_items")
            .select(MENU_SELECT)
            .eq("store_id", store_id)
            .eq("is_available", true)
            .order("name");
        let items: Vec<FoodItem> = self.select(&items_query, None).await?;

        let categories_query = SelectQuery::table("food_categories")
            .select("*")
            .order("name");
        let categories: Vec<FoodCategory> = self.select(&categories_query, None).await?;

        Ok((items, categories))
    }

    /// Get a single available menu item.
    ///
    /// Cart additions re-fetch the item so the cart snapshots the latest
    /// price rather than whatever the browser last rendered.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] if the item does not exist or is
    /// currently unavailable, or another error if the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn get_food_item(&self, item_id: FoodItemId) -> Result<FoodItem, BackendError> {
        let query = SelectQuery::table("food_items")
            .select(MENU_SELECT)
            .eq("id", item_id)
            .eq("is_available", true)
            .limit(1);

        let items: Vec<FoodItem> = self.select(&query, None).await?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(format!("menu item not found: {item_id}")))
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Insert a new order for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or returns no row.
    #[instrument(skip(self, user, order), fields(order_number = %order.order_number))]
    pub async fn create_order(
        &self,
        user: &CurrentUser,
        order: &NewOrder,
    ) -> Result<Order, BackendError> {
        let rows: Vec<Order> = self
            .insert("orders", &[order], &user.access_token)
            .await?;

        rows.into_iter().next().ok_or_else(|| BackendError::Api {
            status: 200,
            message: "order insert returned no row".to_string(),
        })
    }

    /// Insert the line items of a newly created order.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    #[instrument(skip(self, user, items), fields(count = items.len()))]
    pub async fn create_order_items(
        &self,
        user: &CurrentUser,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderItem>, BackendError> {
        self.insert("order_items", items, &user.access_token).await
    }

    /// List the signed-in user's orders, newest first, with embedded store
    /// and line details.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, user))]
    pub async fn list_orders(&self, user: &CurrentUser) -> Result<Vec<Order>, BackendError> {
        let query = SelectQuery::table("orders")
            .select(ORDER_HISTORY_SELECT)
            .eq("customer_id", user.id)
            .order("created_at.desc");

        self.select(&query, Some(&user.access_token)).await
    }
}
