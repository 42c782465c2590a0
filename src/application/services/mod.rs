//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`ProfileAggregator`]: concurrent fan-out to the user and order sources
//!   and the merge of their results

pub mod profile_aggregation;

pub use profile_aggregation::{ProfileAggregator, merge};
