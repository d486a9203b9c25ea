//! Stop identifier value object
//!
//! # Examples
//!
//! ```
//! use domain::StopId;
//!
//! let stop = StopId::parse("1_75403").unwrap();
//! assert_eq!(stop.as_str(), "1_75403");
//!
//! assert!(StopId::parse("").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// An opaque identifier for a fixed transit boarding location
///
/// Stop ids are assigned by the transit agency and are treated as opaque
/// text. The only domain rule is that an id must not be empty or
/// whitespace-only; any encoding concerns belong to the integration layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id, rejecting empty or whitespace-only input
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidStopId(
                "stop id must not be empty".to_string(),
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

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl FromStr for StopId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
