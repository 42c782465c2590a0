//! # REST Handlers
//!
//! Request handlers and shared state.

use crate::api::rest::error::ApiError;
use crate::application::services::ProfileAggregator;
use crate::config::{ConfigError, UpstreamConfig};
use crate::domain::entities::AggregatedProfile;
use crate::domain::value_objects::UserId;
use crate::infrastructure::sources::{HttpClient, HttpOrderSource, HttpUserSource};
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Profile aggregator.
    pub aggregator: ProfileAggregator,
}

impl AppState {
    /// Creates state around an aggregator.
    #[must_use]
    pub fn new(aggregator: ProfileAggregator) -> Self {
        Self { aggregator }
    }

    /// Wires HTTP sources for the configured upstreams.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL does not parse or the HTTP client cannot be built.
    pub fn from_upstream_config(upstream: &UpstreamConfig) -> Result<Self, ConfigError> {
        let client = HttpClient::new(upstream.timeout_ms)?;
        let users = HttpUserSource::new(client.clone(), upstream.user_service_url()?);
        let orders = HttpOrderSource::new(client, upstream.order_service_url()?);
        Ok(Self::new(ProfileAggregator::new(Arc::new(users), Arc::new(orders))))
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// `GET /api/user-profile/{user_id}`
///
/// # Errors
///
/// Returns `ApiError::InvalidPath` for an undecodable ID,
/// `ApiError::MissingUserId` for a blank one and `ApiError::Aggregation`
/// when the user source failed.
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    user_id: Result<Path<String>, PathRejection>,
) -> Result<Json<AggregatedProfile>, ApiError> {
    let Path(user_id) = user_id?;
    let user_id = UserId::new(user_id);
    if user_id.is_blank() {
        return Err(ApiError::MissingUserId);
    }

    let profile = state.aggregator.aggregate(&user_id).await?;
    Ok(Json(profile))
}

/// `GET /api/user-profile` without an ID.
pub async fn missing_user_id() -> ApiError {
    debug!("profile requested without user id");
    ApiError::MissingUserId
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Converts a handler panic into a JSON `500`.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%reason, "handler panicked");
    ApiError::Internal.into_response()
}
