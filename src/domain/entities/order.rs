//! # Order Record
//!
//! A single order from the order service.
//!
//! `total` keeps the exact JSON number the upstream sent, and `date` keeps the
//! upstream string, so an order list is echoed back unchanged (`150` stays
//! `150`, `"2024-9-1"` stays `"2024-9-1"`).

use crate::domain::value_objects::OrderId;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// An order placed by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    order_id: OrderId,
    total: Number,
    date: String,
}

impl OrderRecord {
    /// Creates a new order record.
    #[must_use]
    pub fn new(order_id: OrderId, total: impl Into<Number>, date: impl Into<String>) -> Self {
        Self {
            order_id,
            total: total.into(),
            date: date.into(),
        }
    }

    /// Returns the order ID.
    #[inline]
    #[must_use]
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Returns the order total as received.
    #[inline]
    #[must_use]
    pub fn total(&self) -> &Number {
        &self.total
    }

    /// Returns the order date as received.
    #[inline]
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }
}

impl fmt::Display for OrderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({} total={} on {})", self.order_id, self.total, self.date)
    }
}
