//! OneBusAway data models
//!
//! Typed representations of arrivals, stops, trips, and routes as consumed
//! from a OneBusAway region server. Instances are produced by the client
//! from the raw enveloped JSON and are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Realtime status of a single arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalStatus {
    /// Only the static schedule is known
    Scheduled,
    /// A realtime prediction backs this arrival
    Predicted,
    /// The trip was canceled and will not arrive
    Canceled,
}

impl ArrivalStatus {
    /// Whether realtime data backs this arrival
    #[must_use]
    pub const fn is_realtime(self) -> bool {
        matches!(self, Self::Predicted)
    }
}

/// One scheduled or predicted vehicle arrival at a stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrivalRecord {
    /// Route short name (e.g. "8", "C Line")
    pub route_short_name: String,
    /// Destination text displayed on the vehicle
    pub headsign: String,
    /// Scheduled arrival time
    pub scheduled: DateTime<Utc>,
    /// Predicted arrival time, when realtime data is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted: Option<DateTime<Utc>>,
    /// Realtime status
    pub status: ArrivalStatus,
}

impl ArrivalRecord {
    /// The instant this arrival is expected: the prediction when present,
    /// the schedule otherwise
    #[must_use]
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.predicted.unwrap_or(self.scheduled)
    }
}

/// Metadata describing a transit stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopInfo {
    /// Agency-qualified stop id
    pub id: String,
    /// The rider-facing stop code (the number printed on the sign)
    pub code: String,
    /// Human-readable stop name
    pub name: String,
    /// Compass direction of travel served by this stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Latitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Details for a single scheduled trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripInfo {
    /// Agency-qualified trip id
    pub id: String,
    /// The route this trip belongs to
    pub route_id: String,
    /// Destination text for this trip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
    /// Service calendar the trip runs under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

/// A transit route serving some area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteInfo {
    /// Agency-qualified route id
    pub id: String,
    /// Rider-facing short name (e.g. "8")
    pub short_name: String,
    /// Longer descriptive name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning agency id
    pub agency_id: String,
}
