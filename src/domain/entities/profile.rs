//! # Aggregated Profile
//!
//! The merged view of one user built from every upstream source.
//!
//! A profile can only be constructed around a [`UserRecord`].

use crate::domain::entities::order::OrderRecord;
use crate::domain::entities::user::UserRecord;
use crate::domain::value_objects::{SourceName, Timestamp};
use serde::{Deserialize, Serialize};

/// Bookkeeping attached to every aggregated profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationInfo {
    /// When the merge happened.
    pub timestamp: Timestamp,
    /// Sources queried, in query order.
    pub sources: Vec<SourceName>,
    /// Failure messages from non-critical sources, in source order.
    pub errors: Vec<String>,
}

impl AggregationInfo {
    /// Creates aggregation info for a merge that queried every source.
    #[must_use]
    pub fn new(timestamp: Timestamp, errors: Vec<String>) -> Self {
        Self {
            timestamp,
            sources: SourceName::ALL.to_vec(),
            errors,
        }
    }

    /// Returns true if some non-critical source failed.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A user profile merged from the user and order services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProfile {
    user_info: UserRecord,
    recent_orders: Vec<OrderRecord>,
    aggregation_info: AggregationInfo,
}

impl AggregatedProfile {
    /// Creates a profile with the given orders and no degradation.
    #[must_use]
    pub fn complete(user: UserRecord, orders: Vec<OrderRecord>, timestamp: Timestamp) -> Self {
        Self {
            user_info: user,
            recent_orders: orders,
            aggregation_info: AggregationInfo::new(timestamp, Vec::new()),
        }
    }

    /// Creates a profile whose order history could not be fetched.
    ///
    /// `recent_orders` is forced empty and the failure is recorded in
    /// [`AggregationInfo::errors`].
    #[must_use]
    pub fn degraded(user: UserRecord, order_error: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            user_info: user,
            recent_orders: Vec::new(),
            aggregation_info: AggregationInfo::new(timestamp, vec![order_error.into()]),
        }
    }

    /// Returns the user.
    #[inline]
    #[must_use]
    pub fn user_info(&self) -> &UserRecord {
        &self.user_info
    }

    /// Returns the user's orders, empty when none exist or the fetch failed.
    #[inline]
    #[must_use]
    pub fn recent_orders(&self) -> &[OrderRecord] {
        &self.recent_orders
    }

    /// Returns the aggregation bookkeeping.
    #[inline]
    #[must_use]
    pub fn aggregation_info(&self) -> &AggregationInfo {
        &self.aggregation_info
    }

    /// Returns a copy with the timestamp replaced.
    ///
    /// Two aggregations of unchanged upstream state compare equal once their
    /// timestamps are aligned.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.aggregation_info.timestamp = timestamp;
        self
    }
}
