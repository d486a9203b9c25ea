//! Application services - Use case implementations

mod arrival_formatter;
mod arrival_ranking;
mod arrivals_service;

pub use arrival_formatter::{format_arrival_line, format_no_arrivals, format_summary};
pub use arrival_ranking::{RankedArrival, rank_upcoming};
pub use arrivals_service::ArrivalsService;
