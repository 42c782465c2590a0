//! # Infrastructure Layer
//!
//! Outbound adapters to the upstream services and an in-process mock of them.

pub mod mock_upstream;
pub mod sources;
