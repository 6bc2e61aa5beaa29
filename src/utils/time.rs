//! Time utilities: parsing HH:MM and minute amounts.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Dash time from the shift bounds when not given explicitly.
/// Shifts ending after midnight wrap around.
pub fn shift_minutes(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<i64> {
    match (start, end) {
        (Some(s), Some(e)) => {
            let m = minutes_between(s, e);
            Some(if m < 0 { m + 24 * 60 } else { m })
        }
        _ => None,
    }
}
