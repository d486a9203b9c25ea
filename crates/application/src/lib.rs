//! Application layer - Use cases and orchestration
//!
//! Defines the ports the arrival use cases consume and the pure
//! aggregation/composition logic that turns raw arrival records into a
//! spoken summary. Adapters in the infrastructure layer implement the
//! ports; no dialog or voice-platform concern leaks in here.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
