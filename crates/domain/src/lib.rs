//! Domain layer for StopSovereign
//!
//! Contains the core value objects and domain errors for the transit-arrivals
//! assistant. This layer has no I/O dependencies and defines the ubiquitous
//! language: stops, trips, coordinates, and the look-ahead scan window.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
