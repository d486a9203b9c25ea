//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod arrivals_port;

#[cfg(test)]
pub use arrivals_port::MockArrivalsPort;
pub use arrivals_port::{ArrivalStatus, ArrivalsPort, RouteSummary, StopArrival, StopDetails};
