//! # Domain Enums
//!
//! Names of the upstream sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream service queried during an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceName {
    /// User profile service.
    UserService,
    /// Order history service.
    OrderService,
}

impl SourceName {
    /// Every source, in the order they are queried.
    pub const ALL: [Self; 2] = [Self::UserService, Self::OrderService];

    /// Returns the prefix of this source's failure messages.
    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::UserService => "Failed to fetch user",
            Self::OrderService => "Failed to fetch orders",
        }
    }

    /// Returns the wire name of this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserService => "UserService",
            Self::OrderService => "OrderService",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
