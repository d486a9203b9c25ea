//! OneBusAway service configuration

use serde::{Deserialize, Serialize};

/// Configuration for a OneBusAway region server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObaConfig {
    /// Base URL of the region's REST endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent with every request
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minutes ahead the arrivals endpoint scans
    #[serde(default = "default_scan_minutes")]
    pub scan_minutes: u32,
}

fn default_base_url() -> String {
    "https://api.pugetsound.onebusaway.org/api/where".to_string()
}

fn default_api_key() -> String {
    // The public OneBusAway demo key; production deployments configure their own
    "TEST".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_scan_minutes() -> u32 {
    35
}

impl Default for ObaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_timeout_secs(),
            scan_minutes: default_scan_minutes(),
        }
    }
}

impl ObaConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.base_url.ends_with('/') {
            return Err("base_url must not end with a slash".to_string());
        }

        if self.api_key.is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.scan_minutes == 0 {
            return Err("scan_minutes must be greater than 0".to_string());
        }

        Ok(())
    }
}
