//! # REST API
//!
//! Inbound HTTP surface, built with axum.
//!
//! # Endpoints
//!
//! - `GET /api/user-profile/{userId}` - Aggregated profile (200), fatal
//!   aggregation failure (500), blank ID (400)
//! - `GET /health` - Health check
//!
//! Any other route answers `404 {"error":"Not Found"}`.
//!
//! # Usage
//!
//! ```ignore
//! use profile_aggregator::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::from_upstream_config(&config.upstream)?);
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{AppState, HealthResponse};
pub use routes::create_router;
