//! # User Record
//!
//! The user identity returned by the user service.

use crate::domain::value_objects::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user as reported by the user service.
///
/// Immutable once fetched; owned by a single aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    name: String,
    email: String,
}

impl UserRecord {
    /// Creates a new user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the user ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[inline]
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({} {} <{}>)", self.id, self.name, self.email)
    }
}
