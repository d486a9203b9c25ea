//! Scan window value object
//!
//! # Examples
//!
//! ```
//! use domain::ScanWindow;
//!
//! let window = ScanWindow::default();
//! assert_eq!(window.minutes(), 35);
//!
//! let custom = ScanWindow::from_minutes(10).unwrap();
//! assert_eq!(custom.minutes(), 10);
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The look-ahead duration (minutes) defining which arrivals are "upcoming"
///
/// Anchored to "now" at the moment a ranking pass runs; the window itself is
/// just the width. A window is configured once per query and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScanWindow(u32);

impl ScanWindow {
    /// Default look-ahead used when the caller does not configure one
    pub const DEFAULT_MINUTES: u32 = 35;

    /// Upper bound on the window width; a full day of look-ahead is already
    /// beyond anything a rider would ask for
    pub const MAX_MINUTES: u32 = 1440;

    /// Create a scan window, rejecting zero and absurdly wide values
    pub fn from_minutes(minutes: u32) -> Result<Self, DomainError> {
        if minutes == 0 {
            return Err(DomainError::InvalidScanWindow(
                "scan window must be at least 1 minute".to_string(),
            ));
        }
        if minutes > Self::MAX_MINUTES {
            return Err(DomainError::InvalidScanWindow(format!(
                "scan window must be at most {} minutes",
                Self::MAX_MINUTES
            )));
        }
        Ok(Self(minutes))
    }

    /// The window width in whole minutes
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.0
    }

    /// The window width as a duration
    #[must_use]
    pub fn to_duration(self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_MINUTES)
    }
}

impl TryFrom<u32> for ScanWindow {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<ScanWindow> for u32 {
    fn from(window: ScanWindow) -> Self {
        window.0
    }
}
