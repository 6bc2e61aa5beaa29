use super::delivery::Delivery;
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: i64,                          // ⇔ sessions.id
    pub date: NaiveDate,                  // ⇔ sessions.date (TEXT "YYYY-MM-DD")
    pub start_time: Option<NaiveTime>,    // ⇔ sessions.start_time (TEXT "HH:MM")
    pub end_time: Option<NaiveTime>,      // ⇔ sessions.end_time
    pub active_time_minutes: Option<i64>, // ⇔ sessions.active_minutes
    pub dash_time_minutes: Option<i64>,   // ⇔ sessions.dash_minutes
    pub gas_cost: Option<f64>,            // ⇔ sessions.gas_cost
    pub deliveries: Vec<Delivery>,        // ⇔ deliveries.session_id
    pub source: String,                   // ⇔ sessions.source ('cli' | 'import')
    pub created_at: String,               // ⇔ sessions.created_at (ISO8601)
}

impl Session {
    /// Builds a session not yet stored (`id = 0`, `source = "cli"`).
    pub fn new(date: NaiveDate, deliveries: Vec<Delivery>) -> Self {
        Self {
            id: 0,
            date,
            start_time: None,
            end_time: None,
            active_time_minutes: None,
            dash_time_minutes: None,
            gas_cost: None,
            deliveries,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn with_times(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    pub fn with_minutes(mut self, active: Option<i64>, dash: Option<i64>) -> Self {
        self.active_time_minutes = active;
        self.dash_time_minutes = dash;
        self
    }

    pub fn with_gas(mut self, gas: Option<f64>) -> Self {
        self.gas_cost = gas;
        self
    }

    /// Always equal to `deliveries.len()`.
    pub fn deliveries_count(&self) -> usize {
        self.deliveries.len()
    }

    /// Sum of delivery totals, ignoring deliveries with invalid amounts.
    pub fn earnings(&self) -> f64 {
        self.deliveries
            .iter()
            .filter(|d| d.has_valid_amounts())
            .map(Delivery::total)
            .sum()
    }

    pub fn active_minutes(&self) -> i64 {
        self.active_time_minutes.unwrap_or(0)
    }

    pub fn dash_minutes(&self) -> i64 {
        self.dash_time_minutes.unwrap_or(0)
    }

    pub fn gas(&self) -> f64 {
        self.gas_cost.unwrap_or(0.0)
    }

    /// Session date at 00:00 UTC, in epoch milliseconds.
    pub fn timestamp_ms(&self) -> i64 {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(time: Option<NaiveTime>) -> String {
        time.map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}
