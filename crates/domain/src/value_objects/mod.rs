//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod scan_window;
mod stop_id;
mod trip_id;

pub use geo_point::GeoPoint;
pub use scan_window::ScanWindow;
pub use stop_id::StopId;
pub use trip_id::TripId;
