//! Spoken-summary composition for ranked arrivals
//!
//! Renders ranked arrivals into the exact phrasing the voice front end
//! speaks. The wording, including the trailing `" -- "` after every entry,
//! is an output compatibility contract; do not tidy it up.

use domain::ScanWindow;

use crate::ports::ArrivalStatus;

use super::arrival_ranking::RankedArrival;

/// Separator appended after every rendered arrival line
const LINE_SEPARATOR: &str = " -- ";

/// Render the fixed no-arrivals message for a scan window
#[must_use]
pub fn format_no_arrivals(window: ScanWindow) -> String {
    format!(
        "There are no upcoming arrivals at your stop for the next {} minutes.",
        window.minutes()
    )
}

/// Render a single ranked arrival, without the trailing separator
///
/// Schedule-only arrivals carry the "based on the schedule" qualifier;
/// realtime-backed arrivals state the time plainly.
#[must_use]
pub fn format_arrival_line(ranked: &RankedArrival) -> String {
    let phrase = match ranked.minutes_until {
        0 => "is now arriving".to_string(),
        1 => "is arriving in 1 minute".to_string(),
        minutes => format!("is arriving in {minutes} minutes"),
    };

    let qualifier = if ranked.arrival.status == ArrivalStatus::Predicted {
        ""
    } else {
        " based on the schedule"
    };

    format!(
        "Route {} {} {phrase}{qualifier}",
        ranked.arrival.route_short_name, ranked.arrival.headsign
    )
}

/// Render a full summary for a ranked list
///
/// An empty list produces the fixed no-arrivals message with the window
/// width embedded. Otherwise the lines are joined in ranked order, each
/// followed by the separator. `max_entries` silently truncates the list;
/// truncation never errors.
#[must_use]
pub fn format_summary(
    ranked: &[RankedArrival],
    window: ScanWindow,
    max_entries: Option<usize>,
) -> String {
    if ranked.is_empty() {
        return format_no_arrivals(window);
    }

    let shown = match max_entries {
        Some(max) => &ranked[..ranked.len().min(max)],
        None => ranked,
    };

    let mut summary = String::new();
    for arrival in shown {
        summary.push_str(&format_arrival_line(arrival));
        summary.push_str(LINE_SEPARATOR);
    }
    summary
}
