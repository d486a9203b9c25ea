//! Stop arrivals port
//!
//! Defines the interface for fetching upcoming arrivals and stop metadata.
//! Adapters in the infrastructure layer implement this port against a
//! transit-data API; the application layer only ever sees the plain types
//! below.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{GeoPoint, StopId};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

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

/// One scheduled or predicted vehicle arrival at a stop
///
/// Owned by the response it was fetched with; lives for one ranking pass
/// and is never cached across calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopArrival {
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

impl StopArrival {
    /// The instant this arrival is expected: the prediction when present,
    /// the schedule otherwise
    #[must_use]
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.predicted.unwrap_or(self.scheduled)
    }
}

/// Metadata describing a transit stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StopDetails {
    /// Agency-qualified stop id
    pub id: String,
    /// The rider-facing stop code (the number printed on the sign)
    pub code: String,
    /// Human-readable stop name
    pub name: String,
    /// Compass direction of travel served by this stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// A transit route serving some area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSummary {
    /// Agency-qualified route id
    pub id: String,
    /// Rider-facing short name (e.g. "8")
    pub short_name: String,
    /// Longer descriptive name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

/// Port for stop arrival queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArrivalsPort: Send + Sync {
    /// Fetch raw upcoming arrivals for a stop, scanning `minutes_after` ahead
    async fn arrivals_for_stop(
        &self,
        stop_id: &StopId,
        minutes_after: u32,
    ) -> Result<Vec<StopArrival>, ApplicationError>;

    /// Fetch metadata for a stop
    async fn stop_details(&self, stop_id: &StopId) -> Result<StopDetails, ApplicationError>;

    /// List routes serving the area around a point
    async fn routes_near(
        &self,
        center: GeoPoint,
        radius_meters: u32,
        route_filter: Option<String>,
    ) -> Result<Vec<RouteSummary>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn _assert_object_safe(_: &dyn ArrivalsPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ArrivalsPort>();
    }

    #[test]
    fn test_effective_time() {
        let scheduled = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
        let predicted = Utc.with_ymd_and_hms(2026, 8, 7, 12, 4, 0).unwrap();

        let mut arrival = StopArrival {
            route_short_name: "8".to_string(),
            headsign: "Mlk Way Jr".to_string(),
            scheduled,
            predicted: Some(predicted),
            status: ArrivalStatus::Predicted,
        };
        assert_eq!(arrival.effective_time(), predicted);

        arrival.predicted = None;
        assert_eq!(arrival.effective_time(), scheduled);
    }
}
