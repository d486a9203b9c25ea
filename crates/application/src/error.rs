//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The variants map one-to-one onto the distinct user-facing apologies the
/// (external) dialog layer speaks: a caller bug, an unreachable service, a
/// failed request, and data we could not interpret.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error (caller bug, never retried)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A query was constructed from invalid parameters (caller bug)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The transit service could not be reached (transient)
    #[error("Transit service unreachable: {0}")]
    ServiceUnreachable(String),

    /// The transit service answered with a failure status
    #[error("Transit service request failed: {0}")]
    ServiceFailed(String),

    /// The transit service answered with a payload we could not interpret
    #[error("Malformed transit data: {0}")]
    MalformedData(String),
}

impl ApplicationError {
    /// Check if this error is worth retrying with backoff
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceUnreachable(_))
    }
}
