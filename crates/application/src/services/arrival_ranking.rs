//! Arrival ranking and scan-window filtering
//!
//! Pure functions that turn raw arrival records into a deterministically
//! ordered list of upcoming arrivals within a bounded look-ahead window.

use chrono::{DateTime, Utc};
use domain::ScanWindow;

use crate::ports::{ArrivalStatus, StopArrival};

/// An arrival annotated with its minutes-until-arrival
///
/// Derived and ephemeral: used only for ordering and rendering within one
/// pass, never persisted or cached.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedArrival {
    /// The underlying arrival record
    pub arrival: StopArrival,
    /// Whole minutes from the ranking instant until the effective arrival
    pub minutes_until: i64,
}

/// Filter, sort, and annotate raw arrivals against a scan window.
///
/// `now` is computed once by the caller and shared by the whole batch so
/// every record is evaluated against the same instant; tests inject it
/// instead of reading the wall clock. Canceled trips never rank, and
/// neither do arrivals that already departed. Records landing on the same
/// effective time are ordered by route short name, then headsign, so the
/// output is a total order. Two distinct trips on the same route stay two
/// entries; nothing is merged.
#[must_use]
pub fn rank_upcoming(
    arrivals: Vec<StopArrival>,
    now: DateTime<Utc>,
    window: ScanWindow,
) -> Vec<RankedArrival> {
    let horizon = now + window.to_duration();

    let mut ranked: Vec<RankedArrival> = arrivals
        .into_iter()
        .filter(|arrival| arrival.status != ArrivalStatus::Canceled)
        .filter(|arrival| {
            let eta = arrival.effective_time();
            eta >= now && eta <= horizon
        })
        .map(|arrival| {
            let minutes_until = (arrival.effective_time() - now).num_minutes();
            RankedArrival {
                arrival,
                minutes_until,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.arrival
            .effective_time()
            .cmp(&b.arrival.effective_time())
            .then_with(|| a.arrival.route_short_name.cmp(&b.arrival.route_short_name))
            .then_with(|| a.arrival.headsign.cmp(&b.arrival.headsign))
    });

    ranked
}
