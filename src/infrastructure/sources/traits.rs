//! # Source Traits
//!
//! Port definitions for the upstream data sources.
//!
//! Every source returns a [`SourceResult`] instead of an error: failures are
//! turned into messages at the source boundary so the aggregator only ever
//! merges values.
//!
//! # Examples
//!
//! ```
//! use profile_aggregator::domain::value_objects::SourceName;
//! use profile_aggregator::infrastructure::sources::error::SourceError;
//! use profile_aggregator::infrastructure::sources::traits::SourceResult;
//!
//! let failed: SourceResult<u32> = SourceResult::from_fetch(
//!     SourceName::UserService,
//!     Err(SourceError::upstream(404, "User not found")),
//! );
//! assert_eq!(failed.failure(), Some("Failed to fetch user: User not found"));
//! ```

use crate::domain::entities::{OrderRecord, UserRecord};
use crate::domain::value_objects::{SourceName, UserId};
use crate::infrastructure::sources::error::FetchResult;
use async_trait::async_trait;
use std::fmt;

/// Outcome of one source fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SourceResult<T> {
    /// The source produced a value.
    Ok(T),
    /// The source failed; the message is ready to show to a caller.
    Failed(String),
}

impl<T> SourceResult<T> {
    /// Folds a raw fetch into a source result.
    ///
    /// The failure message is the source's prefix followed by the error's
    /// detail, e.g. `Failed to fetch orders: request timed out: ...`.
    pub fn from_fetch(source: SourceName, result: FetchResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Failed(format!("{}: {}", source.failure_prefix(), error)),
        }
    }

    /// Creates a failed result.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Failed(message) => Some(message),
        }
    }
}

/// Source of user records. Failures are fatal to an aggregation.
#[async_trait]
pub trait UserSource: Send + Sync + fmt::Debug {
    /// Fetches one user.
    ///
    /// An unknown user is a failure, not a missing value.
    async fn fetch(&self, id: &UserId) -> SourceResult<UserRecord>;
}

/// Source of order histories. Failures degrade an aggregation.
#[async_trait]
pub trait OrderSource: Send + Sync + fmt::Debug {
    /// Fetches every order of one user.
    ///
    /// A user without orders is `Ok` with an empty list.
    async fn fetch(&self, id: &UserId) -> SourceResult<Vec<OrderRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sources::error::SourceError;

    #[test]
    fn successful_fetch_is_ok() {
        let result = SourceResult::from_fetch(SourceName::OrderService, Ok(vec![1, 2]));
        assert_eq!(result, SourceResult::Ok(vec![1, 2]));
        assert_eq!(result.failure(), None);
    }

    #[test]
    fn failed_fetch_carries_prefixed_detail() {
        let result: SourceResult<()> = SourceResult::from_fetch(
            SourceName::OrderService,
            Err(SourceError::connection("connection refused")),
        );
        assert_eq!(
            result.failure(),
            Some("Failed to fetch orders: connection failed: connection refused")
        );
    }

    #[test]
    fn bare_status_falls_back_to_generic_description() {
        let result: SourceResult<()> =
            SourceResult::from_fetch(SourceName::UserService, Err(SourceError::status(500)));
        assert_eq!(
            result.failure(),
            Some("Failed to fetch user: Request failed with status code 500")
        );
    }
}
