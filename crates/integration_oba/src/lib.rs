//! OneBusAway REST integration for StopSovereign
//!
//! Talks to a [OneBusAway](https://onebusaway.org) region server (the
//! Puget Sound deployment by default) for upcoming arrivals at a stop, stop
//! metadata, trip details, and routes near a location.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern consistent with the other
//! integration crates. [`ObaClient`] defines the interface for the four
//! query kinds, implemented by [`ObaRestClient`]. Request construction is
//! factored into [`QueryParams`] and [`RequestDescriptor`] so URI assembly
//! is validated and testable without any network I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_oba::{ObaClient, ObaConfig, ObaRestClient};
//!
//! let config = ObaConfig::default();
//! let client = ObaRestClient::new(&config)?;
//!
//! // Scan the next 35 minutes of arrivals at a stop
//! let arrivals = client.arrivals_for_stop("1_75403", 35).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod request;

pub use client::{ObaClient, ObaRestClient};
pub use config::ObaConfig;
pub use error::ObaError;
pub use models::{ArrivalRecord, ArrivalStatus, RouteInfo, StopInfo, TripInfo};
pub use request::{AreaSpan, QueryParams, RequestDescriptor};
