//! Trip identifier value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An opaque identifier for a single scheduled vehicle trip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct TripId(String);

impl TripId {
    /// Parse a trip id, rejecting empty or whitespace-only input
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidTripId(
                "trip id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// The raw id as assigned by the agency
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TripId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl FromStr for TripId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let trip = TripId::parse("1_604370295").unwrap();
        assert_eq!(trip.as_str(), "1_604370295");
    }

    #[test]
    fn test_parse_empty() {
        assert!(TripId::parse("").is_err());
        assert!(TripId::parse("\t").is_err());
    }
}
