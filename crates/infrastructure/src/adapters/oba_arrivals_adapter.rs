//! Arrivals adapter - Implements ArrivalsPort using integration_oba

use application::error::ApplicationError;
use application::ports::{ArrivalStatus, ArrivalsPort, RouteSummary, StopArrival, StopDetails};
use async_trait::async_trait;
use domain::{GeoPoint, StopId};
use integration_oba::{
    ArrivalRecord, ArrivalStatus as ObaArrivalStatus, ObaClient, ObaError, ObaRestClient,
    RouteInfo,
};
use tracing::instrument;

/// Adapter for stop arrival queries backed by a OneBusAway region server
pub struct ObaArrivalsAdapter {
    client: ObaRestClient,
}

impl std::fmt::Debug for ObaArrivalsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObaArrivalsAdapter")
            .field("client", &"ObaRestClient")
            .finish()
    }
}

impl ObaArrivalsAdapter {
    /// Create a new adapter over a configured client
    #[must_use]
    pub const fn new(client: ObaRestClient) -> Self {
        Self { client }
    }

    /// Convert an integration arrival record to the port type
    fn convert_arrival(record: ArrivalRecord) -> StopArrival {
        StopArrival {
            route_short_name: record.route_short_name,
            headsign: record.headsign,
            scheduled: record.scheduled,
            predicted: record.predicted,
            status: Self::convert_status(record.status),
        }
    }

    /// Convert an integration status to the port status
    const fn convert_status(status: ObaArrivalStatus) -> ArrivalStatus {
        match status {
            ObaArrivalStatus::Scheduled => ArrivalStatus::Scheduled,
            ObaArrivalStatus::Predicted => ArrivalStatus::Predicted,
            ObaArrivalStatus::Canceled => ArrivalStatus::Canceled,
        }
    }

    /// Convert an integration route to the port type
    fn convert_route(route: RouteInfo) -> RouteSummary {
        RouteSummary {
            id: route.id,
            short_name: route.short_name,
            long_name: route.long_name,
        }
    }

    /// Map integration errors onto the application taxonomy
    fn map_error(error: ObaError) -> ApplicationError {
        match error {
            ObaError::InvalidArgument(_) => ApplicationError::InvalidQuery(error.to_string()),
            ObaError::ConnectionFailed(_)
            | ObaError::Timeout { .. }
            | ObaError::RateLimitExceeded { .. } => {
                ApplicationError::ServiceUnreachable(error.to_string())
            }
            ObaError::RequestFailed { .. } => ApplicationError::ServiceFailed(error.to_string()),
            ObaError::ParseError(_) => ApplicationError::MalformedData(error.to_string()),
        }
    }
}

#[async_trait]
impl ArrivalsPort for ObaArrivalsAdapter {
    #[instrument(skip(self), fields(stop = %stop_id))]
    async fn arrivals_for_stop(
        &self,
        stop_id: &StopId,
        minutes_after: u32,
    ) -> Result<Vec<StopArrival>, ApplicationError> {
        let records = self
            .client
            .arrivals_for_stop(stop_id.as_str(), minutes_after)
            .await
            .map_err(Self::map_error)?;

        Ok(records.into_iter().map(Self::convert_arrival).collect())
    }

    #[instrument(skip(self), fields(stop = %stop_id))]
    async fn stop_details(&self, stop_id: &StopId) -> Result<StopDetails, ApplicationError> {
        let stop = self
            .client
            .stop_details(stop_id.as_str())
            .await
            .map_err(Self::map_error)?;

        Ok(StopDetails {
            id: stop.id,
            code: stop.code,
            name: stop.name,
            direction: stop.direction,
        })
    }

    #[instrument(skip(self), fields(center = %center))]
    async fn routes_near(
        &self,
        center: GeoPoint,
        radius_meters: u32,
        route_filter: Option<String>,
    ) -> Result<Vec<RouteSummary>, ApplicationError> {
        let routes = self
            .client
            .routes_for_location(center, Some(radius_meters), None, route_filter.as_deref())
            .await
            .map_err(Self::map_error)?;

        Ok(routes.into_iter().map(Self::convert_route).collect())
    }
}
