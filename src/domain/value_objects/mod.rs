//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! - [`UserId`], [`OrderId`]: string-based identifiers
//! - [`Timestamp`]: UTC instant with millisecond rendering
//! - [`SourceName`]: upstream sources

pub mod enums;
pub mod ids;
pub mod timestamp;

pub use enums::SourceName;
pub use ids::{OrderId, UserId};
pub use timestamp::Timestamp;
