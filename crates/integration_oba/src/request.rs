//! Request construction for the OneBusAway REST API
//!
//! Turns typed query parameters into validated, immutable request
//! descriptors (endpoint path plus query parameters). Descriptors are pure
//! values: building one never touches the network, and invalid input fails
//! here instead of producing a malformed URI.

use std::collections::BTreeMap;

use domain::GeoPoint;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::ObaError;

/// Characters escaped when embedding an agency id into a path segment
///
/// The reserved set for path segments, plus `%` so that already-encoded
/// input cannot smuggle a second level of encoding.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Microdegrees per decimal degree
const MICRODEGREES_PER_DEGREE: f64 = 1_000_000.0;

/// Bounding-box span for location queries, in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSpan {
    lat_span: f64,
    lon_span: f64,
}

impl AreaSpan {
    /// Span from decimal degrees
    #[must_use]
    pub const fn degrees(lat_span: f64, lon_span: f64) -> Self {
        Self { lat_span, lon_span }
    }

    /// Span from integer microdegrees (1e-6 degree units)
    #[must_use]
    pub fn microdegrees(lat_span: i32, lon_span: i32) -> Self {
        Self {
            lat_span: f64::from(lat_span) / MICRODEGREES_PER_DEGREE,
            lon_span: f64::from(lon_span) / MICRODEGREES_PER_DEGREE,
        }
    }

    /// Latitude span in decimal degrees
    #[must_use]
    pub const fn lat_span(&self) -> f64 {
        self.lat_span
    }

    /// Longitude span in decimal degrees
    #[must_use]
    pub const fn lon_span(&self) -> f64 {
        self.lon_span
    }
}

/// One fully-specified query against the OneBusAway REST API
///
/// A closed set of query kinds; [`QueryParams::descriptor`] is the single
/// place where each kind turns into an endpoint path and parameter map.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParams {
    /// Upcoming arrivals and departures at a stop
    ArrivalsForStop {
        /// Agency-qualified stop id
        stop_id: String,
        /// Minutes ahead the server should scan
        minutes_after: u32,
    },
    /// Metadata for a single stop
    StopDetails {
        /// Agency-qualified stop id
        stop_id: String,
    },
    /// Details for a single trip
    TripDetails {
        /// Agency-qualified trip id
        trip_id: String,
    },
    /// Routes serving the area around a point
    RoutesForLocation {
        /// Center of the search area
        center: GeoPoint,
        /// Search radius in meters; mutually exclusive with `span`
        radius_meters: Option<u32>,
        /// Bounding-box span; mutually exclusive with `radius_meters`
        span: Option<AreaSpan>,
        /// Free-text route short-name filter
        route_filter: Option<String>,
    },
}

/// An immutable endpoint path plus its query parameters
///
/// Parameter keys are unique and iterate in a stable order. A descriptor is
/// only ever produced by [`QueryParams::descriptor`] and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    path: String,
    params: BTreeMap<String, String>,
}

impl RequestDescriptor {
    fn new(path: String) -> Self {
        Self {
            path,
            params: BTreeMap::new(),
        }
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.params.insert(name.to_string(), value.into());
    }

    /// The endpoint path, with any embedded id already percent-encoded
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters in stable (lexicographic) order
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Look up a single parameter value
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl QueryParams {
    /// Validate this query and build its request descriptor
    ///
    /// # Errors
    ///
    /// Returns [`ObaError::InvalidArgument`] for empty ids, a zero radius,
    /// supplying both or neither of radius and span, or an empty route
    /// filter. A descriptor is never produced from invalid input.
    pub fn descriptor(&self) -> Result<RequestDescriptor, ObaError> {
        match self {
            Self::ArrivalsForStop {
                stop_id,
                minutes_after,
            } => {
                let id = encode_id(stop_id, "stop id")?;
                let mut descriptor = RequestDescriptor::new(format!(
                    "/arrivals-and-departures-for-stop/{id}.json"
                ));
                descriptor.insert("minutesAfter", minutes_after.to_string());
                Ok(descriptor)
            }
            Self::StopDetails { stop_id } => {
                let id = encode_id(stop_id, "stop id")?;
                Ok(RequestDescriptor::new(format!("/stop/{id}.json")))
            }
            Self::TripDetails { trip_id } => {
                let id = encode_id(trip_id, "trip id")?;
                Ok(RequestDescriptor::new(format!("/trip/{id}.json")))
            }
            Self::RoutesForLocation {
                center,
                radius_meters,
                span,
                route_filter,
            } => {
                let mut descriptor =
                    RequestDescriptor::new("/routes-for-location.json".to_string());
                descriptor.insert("lat", center.latitude().to_string());
                descriptor.insert("lon", center.longitude().to_string());

                match (radius_meters, span) {
                    (Some(0), None) => {
                        return Err(ObaError::InvalidArgument(
                            "radius must be greater than zero".to_string(),
                        ));
                    }
                    (Some(radius), None) => {
                        descriptor.insert("radius", radius.to_string());
                    }
                    (None, Some(span)) => {
                        descriptor.insert("latSpan", span.lat_span().to_string());
                        descriptor.insert("lonSpan", span.lon_span().to_string());
                    }
                    (Some(_), Some(_)) => {
                        return Err(ObaError::InvalidArgument(
                            "exactly one of radius or span may be set".to_string(),
                        ));
                    }
                    (None, None) => {
                        return Err(ObaError::InvalidArgument(
                            "either radius or span is required".to_string(),
                        ));
                    }
                }

                if let Some(filter) = route_filter {
                    if filter.trim().is_empty() {
                        return Err(ObaError::InvalidArgument(
                            "route filter must not be empty".to_string(),
                        ));
                    }
                    descriptor.insert("query", filter.clone());
                }

                Ok(descriptor)
            }
        }
    }
}

/// Percent-encode an id for use as a path segment, rejecting blank input
fn encode_id(id: &str, what: &str) -> Result<String, ObaError> {
    if id.trim().is_empty() {
        return Err(ObaError::InvalidArgument(format!(
            "{what} must not be empty"
        )));
    }
    Ok(utf8_percent_encode(id, PATH_SEGMENT).to_string())
}
