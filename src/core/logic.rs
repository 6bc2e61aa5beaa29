use crate::config::Config;
use crate::core::analytics::downsample::{interpolate, simplify_with};
use crate::core::analytics::summary::{DisplayTotals, compute_summary};
use crate::core::analytics::timeseries::{TimeRange, build_cumulative_series};
use crate::core::analytics::{ranking, weekly};
use crate::core::provider::SessionProvider;
use crate::errors::AppResult;
use crate::models::series::CumulativeSeries;
use crate::models::session::Session;
use crate::models::summary::{LocationCount, WeeklyRollup};
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the `summary` view shows, built from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: DisplayTotals,
    pub weekly: Vec<WeeklyRollup>,
    pub selected_week: Option<WeeklyRollup>,
    pub top_locations: Vec<LocationCount>,
}

/// How a cumulative series is prepared for display.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesOptions {
    pub range: TimeRange,
    pub max_points: Option<usize>,
    /// Densify instead of downsampling; the two are never combined.
    pub interpolate: Option<usize>,
}

pub struct Core;

impl Core {
    /// Fetch every session and sort by date (stable).
    pub fn snapshot<P: SessionProvider>(provider: &mut P) -> AppResult<Vec<Session>> {
        let mut sessions = provider.list_sessions()?;
        sessions.sort_by_key(|s| s.date);
        tracing::debug!(sessions = sessions.len(), "loaded session snapshot");
        Ok(sessions)
    }

    /// Keep sessions whose date falls inside `[from, to]`.
    pub fn within(sessions: Vec<Session>, range: Option<(NaiveDate, NaiveDate)>) -> Vec<Session> {
        match range {
            Some((from, to)) => sessions
                .into_iter()
                .filter(|s| s.date >= from && s.date <= to)
                .collect(),
            None => sessions,
        }
    }

    pub fn build_dashboard(sessions: &[Session], cfg: &Config, week: Option<usize>) -> Dashboard {
        let metrics = compute_summary(sessions);
        let weekly = weekly::build_weekly_rollups(sessions);
        let selected_week = weekly::select_week(&weekly, week).cloned();

        Dashboard {
            totals: DisplayTotals::new(&metrics, cfg.bonus()),
            selected_week,
            top_locations: ranking::top_locations(sessions, cfg.top_locations),
            weekly,
        }
    }

    pub fn display_series(
        sessions: &[Session],
        cfg: &Config,
        opts: SeriesOptions,
        now_ms: i64,
    ) -> CumulativeSeries {
        let full = build_cumulative_series(sessions);
        let windowed = opts.range.apply(&full, now_ms);

        match opts.interpolate {
            Some(factor) => windowed.map(|points| interpolate(points, factor)),
            None => {
                let max_points = opts.max_points.unwrap_or(cfg.max_chart_points);
                let policy = cfg.endpoint_policy();
                windowed.map(|points| simplify_with(points, max_points, policy))
            }
        }
    }
}
