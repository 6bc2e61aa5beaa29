//! Cumulative running-total series over an ordered session snapshot.

use crate::errors::{AppError, AppResult};
use crate::models::series::{CumulativeSeries, TimeSeriesPoint};
use crate::models::session::Session;
use std::str::FromStr;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Build the earnings / deliveries / active / dash running totals.
///
/// Input order does not matter: a copy is stable-sorted by date first, so
/// same-day sessions keep their relative order. One point per session is
/// emitted in each series, keyed by the session date.
pub fn build_cumulative_series(sessions: &[Session]) -> CumulativeSeries {
    if sessions.is_empty() {
        return CumulativeSeries::default();
    }

    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by_key(|s| s.date);

    let mut out = CumulativeSeries {
        earnings: Vec::with_capacity(sorted.len()),
        deliveries: Vec::with_capacity(sorted.len()),
        active_time: Vec::with_capacity(sorted.len()),
        dash_time: Vec::with_capacity(sorted.len()),
    };

    let mut earnings = 0.0;
    let mut deliveries = 0usize;
    let mut active = 0i64;
    let mut dash = 0i64;

    for session in sorted {
        let ts = session.timestamp_ms();

        earnings += session.earnings();
        deliveries += session.deliveries_count();
        // negative minutes would break monotonicity
        active += session.active_minutes().max(0);
        dash += session.dash_minutes().max(0);

        out.earnings.push(TimeSeriesPoint::new(ts, earnings));
        out.deliveries
            .push(TimeSeriesPoint::new(ts, deliveries as f64));
        out.active_time.push(TimeSeriesPoint::new(ts, active as f64));
        out.dash_time.push(TimeSeriesPoint::new(ts, dash as f64));
    }

    tracing::debug!(points = out.len(), "built cumulative series");
    out
}

/// Chart window relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    All,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl TimeRange {
    /// Earliest timestamp kept, or `None` for the whole series.
    pub fn cutoff(&self, now_ms: i64) -> Option<i64> {
        let days = match self {
            TimeRange::All => return None,
            TimeRange::Last7Days => 7,
            TimeRange::Last30Days => 30,
            TimeRange::Last90Days => 90,
        };
        Some(now_ms - days * DAY_MS)
    }

    pub fn apply(&self, series: &CumulativeSeries, now_ms: i64) -> CumulativeSeries {
        match self.cutoff(now_ms) {
            Some(cutoff) => series.since(cutoff),
            None => series.clone(),
        }
    }
}

impl FromStr for TimeRange {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "7d" => Ok(TimeRange::Last7Days),
            "30d" => Ok(TimeRange::Last30Days),
            "90d" => Ok(TimeRange::Last90Days),
            other => Err(AppError::InvalidTimeRange(other.to_string())),
        }
    }
}
