//! # API Errors
//!
//! Errors surfaced to HTTP callers and their JSON bodies.

use crate::application::error::AggregationError;
use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Caller-facing summary.
    pub error: String,
    /// Underlying cause, when there is one worth showing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates an error body without details.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Adds details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error type for REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The path did not carry a usable user ID.
    #[error("User ID is required.")]
    MissingUserId,

    /// The aggregation failed fatally.
    #[error("Failed to aggregate user profile.")]
    Aggregation(#[from] AggregationError),

    /// The path parameter could not be extracted.
    #[error("Invalid user ID.")]
    InvalidPath(#[from] PathRejection),

    /// No route matched.
    #[error("Not Found")]
    NotFound,

    /// A handler failed unexpectedly.
    #[error("Something went wrong!")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingUserId => StatusCode::BAD_REQUEST,
            Self::InvalidPath(rejection) => rejection.status(),
            Self::Aggregation(_) | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Returns the JSON body for this error.
    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        let body = ErrorResponse::new(self.to_string());
        match self {
            Self::Aggregation(cause) => body.with_details(cause.details()),
            Self::InvalidPath(rejection) => body.with_details(rejection.body_text()),
            Self::MissingUserId | Self::NotFound | Self::Internal => body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Aggregation(cause) = &self {
            error!(error = %cause, "aggregation failed");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}
