//! Stop arrivals use case
//!
//! The caller-facing contract for the (external) dialog layer: plain values
//! in (a stop id and a configured scan window), a rendered summary or typed
//! error out. One network round trip per query, then purely in-memory
//! ranking and composition.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{ScanWindow, StopId};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{ArrivalsPort, StopArrival};

use super::arrival_formatter::format_summary;
use super::arrival_ranking::rank_upcoming;

/// Answers "what is arriving at my stop" with a spoken summary
pub struct ArrivalsService {
    port: Arc<dyn ArrivalsPort>,
    scan_window: ScanWindow,
    max_spoken: Option<usize>,
}

impl fmt::Debug for ArrivalsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrivalsService")
            .field("scan_window", &self.scan_window)
            .field("max_spoken", &self.max_spoken)
            .finish_non_exhaustive()
    }
}

impl ArrivalsService {
    /// Create a service with the default 35-minute scan window
    #[must_use]
    pub fn new(port: Arc<dyn ArrivalsPort>) -> Self {
        Self {
            port,
            scan_window: ScanWindow::default(),
            max_spoken: None,
        }
    }

    /// Override the scan window
    #[must_use]
    pub fn with_scan_window(mut self, window: ScanWindow) -> Self {
        self.scan_window = window;
        self
    }

    /// Bound the number of arrivals spoken in one summary
    #[must_use]
    pub fn with_max_spoken(mut self, max: usize) -> Self {
        self.max_spoken = Some(max);
        self
    }

    /// Fetch, rank, and render upcoming arrivals for a stop
    ///
    /// Zero upcoming arrivals is a success and renders the fixed
    /// no-arrivals message; every failure propagates typed so the caller
    /// can pick distinct wording per cause.
    #[instrument(skip(self), fields(stop = %stop_id))]
    pub async fn arrivals_summary(&self, stop_id: &StopId) -> Result<String, ApplicationError> {
        let arrivals = self
            .port
            .arrivals_for_stop(stop_id, self.scan_window.minutes())
            .await?;

        debug!(count = arrivals.len(), "Fetched raw arrivals");
        Ok(self.summarize_at(Utc::now(), arrivals))
    }

    /// Render the configured-stop confirmation line
    #[instrument(skip(self), fields(stop = %stop_id))]
    pub async fn stop_summary(&self, stop_id: &StopId) -> Result<String, ApplicationError> {
        let details = self.port.stop_details(stop_id).await?;
        Ok(format!("Your stop is {}, {}.", details.code, details.name))
    }

    /// Rank and render a batch against an explicit instant
    ///
    /// `now` is taken exactly once per pass so the whole batch is judged
    /// against the same moment.
    fn summarize_at(&self, now: DateTime<Utc>, arrivals: Vec<StopArrival>) -> String {
        let ranked = rank_upcoming(arrivals, now, self.scan_window);
        format_summary(&ranked, self.scan_window, self.max_spoken)
    }
}
