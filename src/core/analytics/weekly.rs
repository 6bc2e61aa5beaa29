//! Calendar-week rollups (ISO weeks, Monday to Sunday).

use crate::models::session::Session;
use crate::models::summary::WeeklyRollup;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date - Days::new(offset)
}

/// Group sessions by ISO week and sum them, oldest week first.
/// Ids are assigned 1..n in that order.
pub fn build_weekly_rollups(sessions: &[Session]) -> Vec<WeeklyRollup> {
    let mut weeks: BTreeMap<NaiveDate, WeeklyRollup> = BTreeMap::new();

    for s in sessions {
        let start = week_start(s.date);

        let week = weeks.entry(start).or_insert_with(|| WeeklyRollup {
            id: 0,
            week_number: start.iso_week().week(),
            start_date: start,
            end_date: start + Days::new(6),
            earnings: 0.0,
            gas: 0.0,
            deliveries: 0,
            dash_minutes: 0,
            active_minutes: 0,
        });

        week.earnings += s.earnings();
        week.gas += s.gas();
        week.deliveries += s.deliveries_count();
        week.dash_minutes += s.dash_minutes();
        week.active_minutes += s.active_minutes();
    }

    weeks
        .into_values()
        .enumerate()
        .map(|(i, mut w)| {
            w.id = i + 1;
            w
        })
        .collect()
}

/// The most recent rollup, used as the default weekly view.
pub fn current_week(rollups: &[WeeklyRollup]) -> Option<&WeeklyRollup> {
    rollups.last()
}

/// Select a rollup by id, falling back to the current week.
pub fn select_week(rollups: &[WeeklyRollup], id: Option<usize>) -> Option<&WeeklyRollup> {
    match id {
        Some(id) => rollups.iter().find(|w| w.id == id),
        None => current_week(rollups),
    }
}
