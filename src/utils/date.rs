use crate::errors::{AppError, AppResult};
use chrono::{Months, NaiveDate};

/// Current instant in epoch milliseconds, for chart time windows.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn invalid(msg: &str, input: &str) -> AppError {
    AppError::InvalidDate(format!("{msg}: '{input}'"))
}

/// Last day of the month starting at `first`.
fn month_end(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(Months::new(1))?.pred_opt()
}

/// Expand one period token into its first and last day.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid("invalid year", p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year", p))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year", p))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p
                .get(0..4)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid year", p))?;
            let m: u32 = p
                .get(5..7)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid("invalid month", p))?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid("invalid month", p))?;
            let d2 = month_end(d1).ok_or_else(|| invalid("invalid month", p))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(|| invalid("invalid date", p))?;
            Ok((d, d))
        }
        _ => Err(invalid("unsupported period format", p)),
    }
}

/// Parse a `--period` filter into an inclusive date range.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by ':' (same format on both sides)
///
/// `all` (or no value) means no filter.
pub fn parse_period(period: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let Some(raw) = period.map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start_raw, end_raw)) = raw.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(invalid("start and end must have same format", raw));
        }
        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;
        if d1 > d2 {
            return Err(invalid("start is after end", raw));
        }
        Ok(Some((d1, d2)))
    } else {
        period_bounds(raw).map(Some)
    }
}
