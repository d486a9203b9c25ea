//! OneBusAway REST client
//!
//! Executes request descriptors against a region server and converts the
//! enveloped JSON payloads into typed models. One network round trip per
//! call; retry policy and caching belong to the caller.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::GeoPoint;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ObaConfig;
use crate::error::ObaError;
use crate::models::{ArrivalRecord, ArrivalStatus, RouteInfo, StopInfo, TripInfo};
use crate::request::{AreaSpan, QueryParams, RequestDescriptor};

/// Trait for OneBusAway API clients
#[async_trait]
pub trait ObaClient: Send + Sync {
    /// Upcoming arrivals and departures at a stop, scanning `minutes_after`
    /// ahead of the server's current time
    async fn arrivals_for_stop(
        &self,
        stop_id: &str,
        minutes_after: u32,
    ) -> Result<Vec<ArrivalRecord>, ObaError>;

    /// Metadata for a single stop
    async fn stop_details(&self, stop_id: &str) -> Result<StopInfo, ObaError>;

    /// Details for a single trip
    async fn trip_details(&self, trip_id: &str) -> Result<TripInfo, ObaError>;

    /// Routes serving the area around a point
    ///
    /// Exactly one of `radius_meters` or `span` must be supplied.
    async fn routes_for_location(
        &self,
        center: GeoPoint,
        radius_meters: Option<u32>,
        span: Option<AreaSpan>,
        route_filter: Option<&str>,
    ) -> Result<Vec<RouteInfo>, ObaError>;

    /// Check if the region server is reachable
    async fn is_healthy(&self) -> bool;
}

/// REST client for a OneBusAway region server
#[derive(Debug)]
pub struct ObaRestClient {
    client: Client,
    config: ObaConfig,
}

impl ObaRestClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &ObaConfig) -> Result<Self, ObaError> {
        config.validate().map_err(ObaError::InvalidArgument)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("StopSovereign/0.1")
            .build()
            .map_err(|e| ObaError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Assemble the final request URI: base host, descriptor path, query
    /// parameters, plus the `key` and `version` every request carries
    fn request_url(&self, descriptor: &RequestDescriptor) -> Result<Url, ObaError> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, descriptor.path()))
            .map_err(|e| ObaError::InvalidArgument(format!("invalid request URI: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in descriptor.params() {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("key", &self.config.api_key);
            pairs.append_pair("version", "2");
        }

        Ok(url)
    }

    /// Execute a descriptor and return the raw body of a successful response
    async fn get_body(&self, descriptor: &RequestDescriptor) -> Result<String, ObaError> {
        let url = self.request_url(descriptor)?;

        debug!(path = descriptor.path(), "Executing OneBusAway request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ObaError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                ObaError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ObaError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(ObaError::RequestFailed {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ObaError::ParseError(e.to_string()))
    }

    /// Unwrap the standard OneBusAway response envelope
    ///
    /// The server reports missing resources inside a 200 body, so the
    /// envelope `code` is checked in addition to the HTTP status.
    fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ObaError> {
        let envelope: RawEnvelope<T> =
            serde_json::from_str(body).map_err(|e| ObaError::ParseError(e.to_string()))?;

        if envelope.code != 200 {
            return Err(ObaError::RequestFailed {
                status: envelope.code,
            });
        }

        envelope
            .data
            .ok_or_else(|| ObaError::ParseError("response envelope has no data".to_string()))
    }

    /// Parse an arrivals-and-departures payload into typed arrival records
    fn parse_arrivals_response(body: &str) -> Result<Vec<ArrivalRecord>, ObaError> {
        let data: RawEntryData<RawStopArrivals> = Self::parse_envelope(body)?;

        data.entry
            .arrivals_and_departures
            .into_iter()
            .map(convert_arrival)
            .collect()
    }

    /// Parse a stop payload into stop metadata
    fn parse_stop_response(body: &str) -> Result<StopInfo, ObaError> {
        let data: RawEntryData<RawStop> = Self::parse_envelope(body)?;
        Ok(convert_stop(data.entry))
    }

    /// Parse a trip payload into trip details
    fn parse_trip_response(body: &str) -> Result<TripInfo, ObaError> {
        let data: RawEntryData<RawTrip> = Self::parse_envelope(body)?;
        Ok(convert_trip(data.entry))
    }

    /// Parse a routes-for-location payload into typed routes
    fn parse_routes_response(body: &str) -> Result<Vec<RouteInfo>, ObaError> {
        let data: RawListData<RawRoute> = Self::parse_envelope(body)?;
        Ok(data.list.into_iter().map(convert_route).collect())
    }
}

#[async_trait]
impl ObaClient for ObaRestClient {
    #[instrument(skip(self))]
    async fn arrivals_for_stop(
        &self,
        stop_id: &str,
        minutes_after: u32,
    ) -> Result<Vec<ArrivalRecord>, ObaError> {
        let descriptor = QueryParams::ArrivalsForStop {
            stop_id: stop_id.to_string(),
            minutes_after,
        }
        .descriptor()?;

        let body = self.get_body(&descriptor).await?;
        let arrivals = Self::parse_arrivals_response(&body)?;

        debug!(count = arrivals.len(), "Fetched arrivals");
        Ok(arrivals)
    }

    #[instrument(skip(self))]
    async fn stop_details(&self, stop_id: &str) -> Result<StopInfo, ObaError> {
        let descriptor = QueryParams::StopDetails {
            stop_id: stop_id.to_string(),
        }
        .descriptor()?;

        let body = self.get_body(&descriptor).await?;
        Self::parse_stop_response(&body)
    }

    #[instrument(skip(self))]
    async fn trip_details(&self, trip_id: &str) -> Result<TripInfo, ObaError> {
        let descriptor = QueryParams::TripDetails {
            trip_id: trip_id.to_string(),
        }
        .descriptor()?;

        let body = self.get_body(&descriptor).await?;
        Self::parse_trip_response(&body)
    }

    #[instrument(skip(self), fields(center = %center))]
    async fn routes_for_location(
        &self,
        center: GeoPoint,
        radius_meters: Option<u32>,
        span: Option<AreaSpan>,
        route_filter: Option<&str>,
    ) -> Result<Vec<RouteInfo>, ObaError> {
        let descriptor = QueryParams::RoutesForLocation {
            center,
            radius_meters,
            span,
            route_filter: route_filter.map(str::to_string),
        }
        .descriptor()?;

        let body = self.get_body(&descriptor).await?;
        Self::parse_routes_response(&body)
    }

    async fn is_healthy(&self) -> bool {
        let url = format!(
            "{}/current-time.json?key={}&version=2",
            self.config.base_url, self.config.api_key
        );
        self.client.get(&url).send().await.is_ok()
    }
}

/// Interpret an epoch-milliseconds timestamp from the wire
fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, ObaError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| ObaError::ParseError(format!("timestamp {millis} out of range")))
}

/// Convert a raw arrival to a typed record
///
/// A predicted time of zero means no realtime data; a canceled trip stays
/// canceled even when a stale prediction is attached.
fn convert_arrival(raw: RawArrival) -> Result<ArrivalRecord, ObaError> {
    let scheduled = millis_to_datetime(raw.scheduled_arrival_time)?;

    let predicted = if raw.predicted && raw.predicted_arrival_time > 0 {
        Some(millis_to_datetime(raw.predicted_arrival_time)?)
    } else {
        None
    };

    let canceled = raw
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("canceled") || s.eq_ignore_ascii_case("cancelled"));

    let status = if canceled {
        ArrivalStatus::Canceled
    } else if predicted.is_some() {
        ArrivalStatus::Predicted
    } else {
        ArrivalStatus::Scheduled
    };

    Ok(ArrivalRecord {
        route_short_name: raw.route_short_name.unwrap_or_default(),
        headsign: raw.trip_headsign.unwrap_or_default(),
        scheduled,
        predicted,
        status,
    })
}

/// Convert a raw stop to typed metadata
fn convert_stop(raw: RawStop) -> StopInfo {
    StopInfo {
        id: raw.id.unwrap_or_default(),
        code: raw.code.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        direction: raw.direction,
        latitude: raw.lat,
        longitude: raw.lon,
    }
}

/// Convert a raw trip to typed details
fn convert_trip(raw: RawTrip) -> TripInfo {
    TripInfo {
        id: raw.id.unwrap_or_default(),
        route_id: raw.route_id.unwrap_or_default(),
        headsign: raw.trip_headsign,
        service_id: raw.service_id,
    }
}

/// Convert a raw route to a typed route
fn convert_route(raw: RawRoute) -> RouteInfo {
    RouteInfo {
        id: raw.id.unwrap_or_default(),
        short_name: raw.short_name.unwrap_or_default(),
        long_name: raw.long_name,
        description: raw.description,
        agency_id: raw.agency_id.unwrap_or_default(),
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawEnvelope<T> {
    code: u16,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct RawEntryData<T> {
    entry: T,
}

#[derive(Debug, Deserialize)]
struct RawListData<T> {
    list: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStopArrivals {
    #[serde(default)]
    arrivals_and_departures: Vec<RawArrival>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArrival {
    route_short_name: Option<String>,
    trip_headsign: Option<String>,
    scheduled_arrival_time: i64,
    #[serde(default)]
    predicted_arrival_time: i64,
    #[serde(default)]
    predicted: bool,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStop {
    id: Option<String>,
    code: Option<String>,
    name: Option<String>,
    direction: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrip {
    id: Option<String>,
    route_id: Option<String>,
    trip_headsign: Option<String>,
    service_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    id: Option<String>,
    short_name: Option<String>,
    long_name: Option<String>,
    description: Option<String>,
    agency_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arrivals_response() {
        let json = r#"{
            "code": 200,
            "currentTime": 1470355200000,
            "text": "OK",
            "version": 2,
            "data": {
                "entry": {
                    "stopId": "1_75403",
                    "arrivalsAndDepartures": [
                        {
                            "routeId": "1_100275",
                            "routeShortName": "8",
                            "tripHeadsign": "Mlk Way Jr",
                            "scheduledArrivalTime": 1470355800000,
                            "predictedArrivalTime": 0,
                            "predicted": false,
                            "status": "default"
                        },
                        {
                            "routeId": "1_100044",
                            "routeShortName": "11",
                            "tripHeadsign": "Madison Park",
                            "scheduledArrivalTime": 1470356100000,
                            "predictedArrivalTime": 1470356220000,
                            "predicted": true,
                            "status": "default"
                        }
                    ]
                },
                "references": {}
            }
        }"#;

        let arrivals = ObaRestClient::parse_arrivals_response(json).unwrap();
        assert_eq!(arrivals.len(), 2);

        assert_eq!(arrivals[0].route_short_name, "8");
        assert_eq!(arrivals[0].headsign, "Mlk Way Jr");
        assert_eq!(arrivals[0].status, ArrivalStatus::Scheduled);
        assert!(arrivals[0].predicted.is_none());

        assert_eq!(arrivals[1].status, ArrivalStatus::Predicted);
        assert_eq!(
            arrivals[1].predicted.unwrap().timestamp_millis(),
            1_470_356_220_000
        );
    }

    #[test]
    fn test_parse_arrivals_canceled_status() {
        let json = r#"{
            "code": 200,
            "data": {
                "entry": {
                    "arrivalsAndDepartures": [{
                        "routeShortName": "49",
                        "tripHeadsign": "Broadway",
                        "scheduledArrivalTime": 1470355800000,
                        "predictedArrivalTime": 1470355900000,
                        "predicted": true,
                        "status": "CANCELED"
                    }]
                }
            }
        }"#;

        let arrivals = ObaRestClient::parse_arrivals_response(json).unwrap();
        assert_eq!(arrivals[0].status, ArrivalStatus::Canceled);
    }

    #[test]
    fn test_parse_arrivals_empty() {
        let json = r#"{
            "code": 200,
            "data": { "entry": { "arrivalsAndDepartures": [] } }
        }"#;

        let arrivals = ObaRestClient::parse_arrivals_response(json).unwrap();
        assert!(arrivals.is_empty());
    }

    #[test]
    fn test_envelope_error_code_surfaces_as_request_failure() {
        let json = r#"{ "code": 404, "text": "resource not found" }"#;
        let result = ObaRestClient::parse_arrivals_response(json);
        assert!(matches!(
            result,
            Err(ObaError::RequestFailed { status: 404 })
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = ObaRestClient::parse_arrivals_response("not json");
        assert!(matches!(result, Err(ObaError::ParseError(_))));
    }

    #[test]
    fn test_parse_stop_response() {
        let json = r#"{
            "code": 200,
            "data": {
                "entry": {
                    "id": "1_6497",
                    "code": "6497",
                    "name": "University Area Transit Center",
                    "direction": "N",
                    "lat": 28.06,
                    "lon": -82.43
                }
            }
        }"#;

        let stop = ObaRestClient::parse_stop_response(json).unwrap();
        assert_eq!(stop.code, "6497");
        assert_eq!(stop.name, "University Area Transit Center");
        assert_eq!(stop.direction.as_deref(), Some("N"));
    }

    #[test]
    fn test_parse_trip_response() {
        let json = r#"{
            "code": 200,
            "data": {
                "entry": {
                    "id": "1_604370295",
                    "routeId": "1_100275",
                    "tripHeadsign": "Mlk Way Jr",
                    "serviceId": "1_WEEKDAY"
                }
            }
        }"#;

        let trip = ObaRestClient::parse_trip_response(json).unwrap();
        assert_eq!(trip.id, "1_604370295");
        assert_eq!(trip.route_id, "1_100275");
        assert_eq!(trip.headsign.as_deref(), Some("Mlk Way Jr"));
    }

    #[test]
    fn test_parse_routes_response() {
        let json = r#"{
            "code": 200,
            "data": {
                "list": [
                    {
                        "id": "1_100275",
                        "shortName": "8",
                        "longName": "Seattle Center - Rainier Beach",
                        "agencyId": "1"
                    },
                    {
                        "id": "1_100044",
                        "shortName": "11",
                        "description": "Madison Park - Downtown",
                        "agencyId": "1"
                    }
                ],
                "limitExceeded": false
            }
        }"#;

        let routes = ObaRestClient::parse_routes_response(json).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].short_name, "8");
        assert_eq!(
            routes[0].long_name.as_deref(),
            Some("Seattle Center - Rainier Beach")
        );
        assert!(routes[1].long_name.is_none());
        assert_eq!(routes[1].agency_id, "1");
    }

    #[test]
    fn test_request_url_carries_key_and_version() {
        let config = ObaConfig::for_testing();
        let client = ObaRestClient::new(&config).unwrap();

        let descriptor = QueryParams::ArrivalsForStop {
            stop_id: "1_75403".to_string(),
            minutes_after: 35,
        }
        .descriptor()
        .unwrap();

        let url = client.request_url(&descriptor).unwrap();
        assert!(
            url.path()
                .ends_with("/arrivals-and-departures-for-stop/1_75403.json")
        );

        let query = url.query().unwrap();
        assert!(query.contains("minutesAfter=35"));
        assert!(query.contains("key=TEST"));
        assert!(query.contains("version=2"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ObaConfig {
            base_url: String::new(),
            ..ObaConfig::default()
        };
        assert!(matches!(
            ObaRestClient::new(&config),
            Err(ObaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_millis_out_of_range() {
        assert!(millis_to_datetime(i64::MAX).is_err());
    }
}
