//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid stop identifier
    #[error("Invalid stop id: {0}")]
    InvalidStopId(String),

    /// Invalid trip identifier
    #[error("Invalid trip id: {0}")]
    InvalidTripId(String),

    /// Invalid geographic coordinates
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Invalid scan window
    #[error("Invalid scan window: {0}")]
    InvalidScanWindow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidStopId("stop id must not be empty".to_string());
        assert!(err.to_string().contains("stop id"));

        let err = DomainError::InvalidScanWindow("0 minutes".to_string());
        assert!(err.to_string().contains("scan window"));
    }
}
