//! Import of the JSON data file format used by earlier versions of the
//! tracker: `{"sessions": [...]}` (or a bare array), amounts given as
//! numbers or currency strings, pay split into `doordash_pay` and `tip`.

use crate::core::add::parse_amount;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::insert_sessions;
use crate::errors::{AppError, AppResult};
use crate::models::delivery::Delivery;
use crate::models::session::Session;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub malformed: usize,
    pub bonus_records: usize,
}

enum Parsed {
    Session(Session),
    Malformed(String),
    Bonus,
}

/// Numbers pass through; strings lose `$` and `,`; anything else is 0.
fn numeric(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_amount(s).unwrap_or_else(|_| {
            tracing::warn!(value = %s, "could not convert to a number, using 0");
            0.0
        }),
        _ => 0.0,
    }
}

/// Minutes must be finite and non-negative, like the ones `add` accepts.
fn optional_minutes(value: Option<&Value>, key: &str) -> Result<Option<i64>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_amount(s)
            .map(|m| Some(m.round() as i64))
            .map_err(|_| format!("{key} must be a non-negative number")),
        v => {
            let minutes = numeric(v);
            if !minutes.is_finite() || minutes < 0.0 {
                return Err(format!("{key} must be a non-negative number"));
            }
            Ok(Some(minutes.round() as i64))
        }
    }
}

fn parse_delivery(value: &Value) -> Result<Delivery, String> {
    let obj = value.as_object().ok_or("delivery is not an object")?;

    let restaurant = obj
        .get("restaurant")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string();

    // "total" is ignored on purpose: it is always recomputed
    let base_pay = numeric(obj.get("doordash_pay").or_else(|| obj.get("base_pay")));
    let tip = numeric(obj.get("tip"));

    let delivery = Delivery::new(restaurant, base_pay, tip);
    if !delivery.has_valid_amounts() {
        return Err(format!("invalid amounts for '{}'", delivery.restaurant));
    }
    Ok(delivery)
}

fn parse_session(value: &Value) -> Parsed {
    let Some(obj) = value.as_object() else {
        return Parsed::Malformed("record is not an object".into());
    };

    if obj.contains_key("challenge_bonus") {
        return Parsed::Bonus;
    }

    let Some(date) = obj.get("date").and_then(Value::as_str).and_then(parse_date) else {
        return Parsed::Malformed("missing or invalid date".into());
    };

    let raw_deliveries: &[Value] = match obj.get("deliveries") {
        Some(Value::Array(items)) => items.as_slice(),
        None | Some(Value::Null) => &[],
        Some(_) => return Parsed::Malformed(format!("{date}: deliveries is not a list")),
    };

    let mut deliveries = Vec::with_capacity(raw_deliveries.len());
    for item in raw_deliveries {
        match parse_delivery(item) {
            Ok(d) => deliveries.push(d),
            Err(e) => return Parsed::Malformed(format!("{date}: {e}")),
        }
    }

    if let Some(declared) = obj.get("deliveries_count") {
        let declared = numeric(Some(declared)).round() as usize;
        if declared != deliveries.len() {
            return Parsed::Malformed(format!(
                "{date}: deliveries_count {declared} does not match {} listed deliveries",
                deliveries.len()
            ));
        }
    }

    let minutes = |key: &str| optional_minutes(obj.get(key), key);
    let (active, dash) = match (minutes("active_time_minutes"), minutes("dash_time_minutes")) {
        (Ok(active), Ok(dash)) => (active, dash),
        (Err(e), _) | (_, Err(e)) => return Parsed::Malformed(format!("{date}: {e}")),
    };

    let time = |key: &str| obj.get(key).and_then(Value::as_str).and_then(parse_time);
    let gas = obj
        .get("gas_cost")
        .or_else(|| obj.get("gas"))
        .map(|v| numeric(Some(v)));

    let mut session = Session::new(date, deliveries)
        .with_times(time("start_time"), time("end_time"))
        .with_minutes(active, dash)
        .with_gas(gas);
    session.source = "import".to_string();

    Parsed::Session(session)
}

/// Extract session records from either `{"sessions": [...]}` or `[...]`.
fn session_records(root: &Value) -> AppResult<&[Value]> {
    match root {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Object(obj) => match obj.get("sessions") {
            Some(Value::Array(items)) => Ok(items.as_slice()),
            _ => Err(AppError::Import("no 'sessions' array found".into())),
        },
        _ => Err(AppError::Import("unexpected JSON root".into())),
    }
}

/// Parse the records without touching the store.
pub fn parse_records(json: &str) -> AppResult<(Vec<Session>, ImportReport)> {
    let root: Value = serde_json::from_str(json)?;
    let mut report = ImportReport::default();
    let mut sessions = Vec::new();

    for (i, record) in session_records(&root)?.iter().enumerate() {
        match parse_session(record) {
            Parsed::Session(s) => sessions.push(s),
            Parsed::Bonus => report.bonus_records += 1,
            Parsed::Malformed(reason) => {
                tracing::warn!(record = i, %reason, "skipping malformed session record");
                report.malformed += 1;
            }
        }
    }

    Ok((sessions, report))
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn import(pool: &mut DbPool, file: &str) -> AppResult<ImportReport> {
        let path = Path::new(file);
        info(format!("Importing sessions from {}", path.display()));

        let content = fs::read_to_string(path)?;
        let (sessions, mut report) = parse_records(&content)?;

        report.imported = insert_sessions(&mut pool.conn, &sessions)?;

        if report.malformed > 0 {
            warning(format!("Skipped {} malformed record(s).", report.malformed));
        }
        if report.bonus_records > 0 {
            warning(format!(
                "Skipped {} challenge-bonus record(s); the bonus is configured via 'challenge_bonus'.",
                report.bonus_records
            ));
        }

        let message = format!(
            "Imported {} session(s) from {}",
            report.imported,
            path.display()
        );
        if let Err(e) = ttlog(&pool.conn, "import", file, &message) {
            tracing::warn!(error = %e, "failed to write internal log");
        }
        success(message);

        Ok(report)
    }
}
