//! # Application Errors
//!
//! The single error an aggregation may end with.
//!
//! Non-critical source failures are data (see
//! [`AggregationInfo::errors`](crate::domain::entities::AggregationInfo)), so
//! the only variant here is a failed critical source.
//!
//! # Examples
//!
//! ```
//! use profile_aggregator::application::error::AggregationError;
//! use profile_aggregator::domain::value_objects::SourceName;
//!
//! let err = AggregationError::critical_source(SourceName::UserService, "Failed to fetch user: User not found");
//! assert_eq!(err.details(), "Failed to fetch user: User not found");
//! ```

use crate::domain::value_objects::SourceName;
use thiserror::Error;

/// Fatal aggregation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// A critical source failed, so no profile can be built.
    #[error("critical source {source_name} failed: {message}")]
    CriticalSource {
        /// The failed source.
        source_name: SourceName,
        /// The source's failure message.
        message: String,
    },
}

impl AggregationError {
    /// Creates a critical source error.
    #[must_use]
    pub fn critical_source(source_name: SourceName, message: impl Into<String>) -> Self {
        Self::CriticalSource {
            source_name,
            message: message.into(),
        }
    }

    /// Returns the message to show callers as error details.
    #[must_use]
    pub fn details(&self) -> &str {
        match self {
            Self::CriticalSource { message, .. } => message,
        }
    }

    /// Returns the source whose failure ended the aggregation.
    #[must_use]
    pub fn source_name(&self) -> SourceName {
        match self {
            Self::CriticalSource { source_name, .. } => *source_name,
        }
    }
}

/// Result type for aggregation operations.
pub type AggregationResult<T> = Result<T, AggregationError>;
