//! # Application Layer
//!
//! Aggregation use case and its error type.

pub mod error;
pub mod services;

pub use error::{AggregationError, AggregationResult};
pub use services::ProfileAggregator;
