//! # Profile Aggregator
//!
//! Backend-for-frontend service that merges a user's profile and order
//! history from two independent upstream services into one response.
//!
//! For each request the user service and the order service are queried
//! concurrently. The user service is critical: if it fails, the request fails.
//! The order service is not: if it fails, the profile is returned with an
//! empty order list and the failure recorded in `aggregationInfo.errors`.
//!
//! ## Layers
//!
//! - [`domain`]: records, identifiers and the aggregated profile
//! - [`application`]: the [`ProfileAggregator`](application::ProfileAggregator)
//!   fan-out and merge policy
//! - [`infrastructure`]: HTTP sources and the mock upstream
//! - [`api`]: axum REST surface
//! - [`config`], [`telemetry`]: process bootstrap

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
