//! Derived aggregates. None of these is stored; each query rebuilds them
//! from the current session snapshot.

use super::merchant_type::MerchantType;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_earnings: f64,
    pub total_gas: f64,
    pub total_net: f64,
    pub deliveries_made: usize,
    pub avg_per_delivery: f64,
    pub total_dash_minutes: i64,
    pub total_active_minutes: i64,
    /// Not clamped: a value above 100 means active > dash upstream.
    pub time_efficiency_pct: i64,
    pub session_count: usize,
    pub avg_per_session: f64,
    pub avg_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyRollup {
    pub id: usize,
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub earnings: f64,
    pub gas: f64,
    pub deliveries: usize,
    pub dash_minutes: i64,
    pub active_minutes: i64,
}

impl WeeklyRollup {
    pub fn net(&self) -> f64 {
        self.earnings - self.gas
    }

    pub fn time_efficiency_pct(&self) -> i64 {
        crate::core::analytics::summary::time_efficiency_pct(
            self.active_minutes,
            self.dash_minutes,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantSummary {
    pub name: String,
    pub merchant_type: MerchantType,
    pub deliveries_count: usize,
    pub base_pay_total: f64,
    pub tips_total: f64,
    pub total_earnings: f64,
    pub avg_per_delivery: f64,
    pub visit_count: usize,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCount {
    pub name: String,
    pub count: usize,
}
