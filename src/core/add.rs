use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::insert_session;
use crate::errors::{AppError, AppResult};
use crate::models::delivery::Delivery;
use crate::models::session::Session;
use crate::ui::messages::{success, warning};
use crate::utils::formatting::fmt_money;
use crate::utils::time::shift_minutes;
use chrono::{NaiveDate, NaiveTime};

/// Parse a currency amount: `4`, `4.50`, `$4.50`, `$1,204.10`.
/// Negative and non-finite values are rejected.
pub fn parse_amount(raw: &str) -> AppResult<f64> {
    let clean: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    let value: f64 = clean
        .parse()
        .map_err(|_| AppError::InvalidAmount(raw.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidAmount(raw.to_string()));
    }
    Ok(value)
}

/// Parse one `--delivery` argument: `MERCHANT=BASE[+TIP]`.
pub fn parse_delivery(raw: &str) -> AppResult<Delivery> {
    let (name, amounts) = raw.rsplit_once('=').ok_or_else(|| {
        AppError::InvalidDelivery(format!(
            "'{raw}' (expected MERCHANT=BASE+TIP, e.g. \"Kroger=6.00+1.50\")"
        ))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidDelivery(format!(
            "'{raw}' (merchant name is empty)"
        )));
    }

    let (base, tip) = match amounts.split_once('+') {
        Some((b, t)) => (parse_amount(b)?, parse_amount(t)?),
        None => (parse_amount(amounts)?, 0.0),
    };

    Ok(Delivery::new(name, base, tip))
}

/// Input collected by the `add` command.
#[derive(Debug, Default)]
pub struct NewSession {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub active: Option<i64>,
    pub dash: Option<i64>,
    pub gas: Option<f64>,
    pub deliveries: Vec<Delivery>,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate the input and turn it into an unsaved session.
    pub fn build(input: NewSession) -> AppResult<Session> {
        let date = input
            .date
            .ok_or_else(|| AppError::InvalidDate("missing date".into()))?;

        for (label, value) in [("active", input.active), ("dash", input.dash)] {
            if let Some(v) = value
                && v < 0
            {
                return Err(AppError::Other(format!(
                    "{label} minutes cannot be negative ({v})"
                )));
            }
        }

        if let Some(g) = input.gas
            && (!g.is_finite() || g < 0.0)
        {
            return Err(AppError::InvalidAmount(g.to_string()));
        }

        let dash = input.dash.or_else(|| shift_minutes(input.start, input.end));

        if let (Some(a), Some(d)) = (input.active, dash)
            && a > d
        {
            warning(format!(
                "Active time ({a} min) exceeds dash time ({d} min); efficiency will read above 100%."
            ));
        }

        Ok(Session::new(date, input.deliveries)
            .with_times(input.start, input.end)
            .with_minutes(input.active, dash)
            .with_gas(input.gas))
    }

    pub fn apply(pool: &mut DbPool, input: NewSession) -> AppResult<i64> {
        let session = Self::build(input)?;
        let id = insert_session(&mut pool.conn, &session)?;

        let message = format!(
            "Session #{} on {}: {} deliveries, {}",
            id,
            session.date_str(),
            session.deliveries_count(),
            fmt_money(session.earnings())
        );

        if let Err(e) = ttlog(&pool.conn, "add", &session.date_str(), &message) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        success(message);
        Ok(id)
    }
}
