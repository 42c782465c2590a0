//! # Source Errors
//!
//! Transport-level failures raised while talking to an upstream service.
//!
//! A [`SourceError`] never leaves the source that produced it: sources fold
//! it into a [`SourceResult::Failed`](super::traits::SourceResult) message.
//! Its `Display` output is that message's detail, so variants carrying an
//! upstream-provided explanation render it verbatim.
//!
//! # Examples
//!
//! ```
//! use profile_aggregator::infrastructure::sources::error::SourceError;
//!
//! let error = SourceError::upstream(404, "User not found");
//! assert_eq!(error.to_string(), "User not found");
//! assert!(error.is_not_found());
//!
//! let error = SourceError::status(502);
//! assert_eq!(error.to_string(), "Request failed with status code 502");
//! ```

use thiserror::Error;

/// Error type for upstream fetches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Request did not complete within the client timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Connection could not be established or was dropped.
    #[error("connection failed: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Upstream answered non-2xx with an `error` field in its body.
    #[error("{message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Upstream-provided error detail.
        message: String,
    },

    /// Upstream answered non-2xx without a usable error body.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// Client-side failure before any request was sent.
    #[error("client error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an error carrying the upstream's own explanation.
    #[must_use]
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a bare status error.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status the upstream answered with, if it answered.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } | Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the upstream reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    /// Returns true if no HTTP response was received at all.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection { .. })
    }
}

/// Result type for raw upstream fetches.
pub type FetchResult<T> = Result<T, SourceError>;
