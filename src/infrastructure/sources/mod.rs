//! # Upstream Sources
//!
//! Adapters for the services a profile is aggregated from.
//!
//! ## Ports
//!
//! - [`UserSource`]: critical source of user identity
//! - [`OrderSource`]: non-critical source of order history
//!
//! ## Implementations
//!
//! - [`HttpUserSource`], [`HttpOrderSource`]: REST adapters sharing one [`HttpClient`]

pub mod error;
pub mod http_client;
pub mod order_source;
pub mod traits;
pub mod user_source;

pub use error::{FetchResult, SourceError};
pub use http_client::HttpClient;
pub use order_source::HttpOrderSource;
pub use traits::{OrderSource, SourceResult, UserSource};
pub use user_source::HttpUserSource;
