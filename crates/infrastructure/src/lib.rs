//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! OneBusAway integration crate.

pub mod adapters;

pub use adapters::*;
