//! OneBusAway error types

use thiserror::Error;

/// Errors that can occur during OneBusAway operations
#[derive(Debug, Error)]
pub enum ObaError {
    /// A query was constructed from invalid parameters (caller bug)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection to the region server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The server answered with a non-success status
    ///
    /// Covers both the HTTP status line and the `code` field of the response
    /// envelope; OneBusAway reports missing resources inside a 200 body.
    #[error("Request failed with status {status}")]
    RequestFailed {
        /// HTTP or envelope status code
        status: u16,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// Failed to parse a response into the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ObaError {
    /// Returns true if this error is worth retrying with backoff
    ///
    /// Failed requests are not retryable: a status other than 429 is treated
    /// as non-transient, and retrying a parse failure would replay the same
    /// schema drift.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. }
        )
    }
}
