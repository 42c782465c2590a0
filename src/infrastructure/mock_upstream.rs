//! # Mock Upstream
//!
//! In-process stand-in for the user and order services.
//!
//! Serves both upstream contracts from one axum router over a seeded
//! dataset, with a fixed per-endpoint latency so fan-out timing is visible:
//!
//! - `GET /users/{id}` → `200 {id,name,email}` or `404 {"error":"User not found"}`
//! - `GET /orders?userId={id}` → `200 [..]`, empty for users without orders
//!
//! # Usage
//!
//! ```ignore
//! use profile_aggregator::infrastructure::mock_upstream::{MockUpstream, MockUpstreamConfig};
//!
//! let router = MockUpstream::seeded(MockUpstreamConfig::default()).into_router();
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
//! axum::serve(listener, router).await?;
//! ```

use crate::domain::entities::{OrderRecord, UserRecord};
use crate::domain::value_objects::{OrderId, UserId};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Latency settings for the mock upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockUpstreamConfig {
    /// Delay before answering `/users/{id}`.
    pub user_latency: Duration,
    /// Delay before answering `/orders`.
    pub order_latency: Duration,
}

impl Default for MockUpstreamConfig {
    fn default() -> Self {
        Self {
            user_latency: Duration::from_millis(50),
            order_latency: Duration::from_millis(100),
        }
    }
}

impl MockUpstreamConfig {
    /// Configuration that answers immediately.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            user_latency: Duration::ZERO,
            order_latency: Duration::ZERO,
        }
    }
}

/// Seeded user and order data served by the mock.
#[derive(Debug, Clone, Default)]
pub struct MockUpstream {
    users: HashMap<String, UserRecord>,
    orders: HashMap<String, Vec<OrderRecord>>,
    config: MockUpstreamConfig,
}

impl MockUpstream {
    /// Creates an empty mock.
    #[must_use]
    pub fn new(config: MockUpstreamConfig) -> Self {
        Self {
            users: HashMap::new(),
            orders: HashMap::new(),
            config,
        }
    }

    /// Creates a mock holding the demo dataset.
    ///
    /// Users `1` (Alice) and `2` (Bob) exist; Alice has two orders, Bob one.
    #[must_use]
    pub fn seeded(config: MockUpstreamConfig) -> Self {
        let mut upstream = Self::new(config);
        upstream
            .insert_user(UserRecord::new(UserId::new("1"), "Alice", "alice@example.com"))
            .insert_user(UserRecord::new(UserId::new("2"), "Bob", "bob@example.com"));
        upstream
            .insert_orders("1", vec![order("o101", 150, "2024-09-01"), order("o102", 200, "2024-09-05")])
            .insert_orders("2", vec![order("o201", 50, "2024-09-08")]);
        upstream
    }

    /// Adds or replaces a user.
    pub fn insert_user(&mut self, user: UserRecord) -> &mut Self {
        self.users.insert(user.id().as_str().to_owned(), user);
        self
    }

    /// Sets the order history of a user.
    pub fn insert_orders(&mut self, user_id: impl Into<String>, orders: Vec<OrderRecord>) -> &mut Self {
        self.orders.insert(user_id.into(), orders);
        self
    }

    /// Builds the router serving both upstream contracts.
    pub fn into_router(self) -> Router {
        Router::new()
            .route("/users/{id}", get(get_user))
            .route("/orders", get(get_orders))
            .with_state(Arc::new(self))
    }
}

fn order(id: &str, total: u64, date: &str) -> OrderRecord {
    OrderRecord::new(OrderId::new(id), total, date)
}

#[derive(Debug, Deserialize)]
struct OrdersQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

async fn get_user(State(upstream): State<Arc<MockUpstream>>, Path(id): Path<String>) -> Response {
    info!(user_id = %id, "mock user request");
    tokio::time::sleep(upstream.config.user_latency).await;

    match upstream.users.get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
    }
}

async fn get_orders(
    State(upstream): State<Arc<MockUpstream>>,
    Query(query): Query<OrdersQuery>,
) -> Json<Vec<OrderRecord>> {
    let user_id = query.user_id.unwrap_or_default();
    info!(user_id = %user_id, "mock orders request");
    tokio::time::sleep(upstream.config.order_latency).await;

    Json(upstream.orders.get(&user_id).cloned().unwrap_or_default())
}
