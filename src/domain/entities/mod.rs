//! # Domain Entities
//!
//! Records fetched from upstream services and the profile merged from them.
//!
//! - [`UserRecord`]: user identity, the anchor of every aggregation
//! - [`OrderRecord`]: one order from the order history
//! - [`AggregatedProfile`]: the merged response

pub mod order;
pub mod profile;
pub mod user;

pub use order::OrderRecord;
pub use profile::{AggregatedProfile, AggregationInfo};
pub use user::UserRecord;
