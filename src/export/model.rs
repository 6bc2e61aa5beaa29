// src/export/model.rs

use crate::core::analytics::classifier::classify;
use crate::models::session::Session;
use crate::models::summary::{MerchantSummary, WeeklyRollup};
use crate::utils::formatting::round2;
use serde::Serialize;

/// Flat session row. Times and minutes stay empty when unknown.
#[derive(Serialize, Clone, Debug)]
pub struct SessionExport {
    pub id: i64,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub active_time_minutes: Option<i64>,
    pub dash_time_minutes: Option<i64>,
    pub deliveries_count: usize,
    pub earnings: f64,
    pub gas_cost: f64,
    pub net: f64,
    pub source: String,
}

impl From<&Session> for SessionExport {
    fn from(s: &Session) -> Self {
        let hhmm = |t: Option<chrono::NaiveTime>| t.map(|t| t.format("%H:%M").to_string());
        Self {
            id: s.id,
            date: s.date_str(),
            start_time: hhmm(s.start_time),
            end_time: hhmm(s.end_time),
            active_time_minutes: s.active_time_minutes,
            dash_time_minutes: s.dash_time_minutes,
            deliveries_count: s.deliveries_count(),
            earnings: round2(s.earnings()),
            gas_cost: round2(s.gas()),
            net: round2(s.earnings() - s.gas()),
            source: s.source.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct DeliveryExport {
    pub session_id: i64,
    pub date: String,
    pub restaurant: String,
    pub merchant_type: String,
    pub base_pay: f64,
    pub tip: f64,
    pub total: f64,
}

pub(crate) fn deliveries_of(sessions: &[Session]) -> Vec<DeliveryExport> {
    sessions
        .iter()
        .flat_map(|s| {
            s.deliveries.iter().map(move |d| DeliveryExport {
                session_id: s.id,
                date: s.date_str(),
                restaurant: d.restaurant.clone(),
                merchant_type: classify(&d.restaurant).label().to_string(),
                base_pay: round2(d.base_pay),
                tip: round2(d.tip),
                total: round2(d.total()),
            })
        })
        .collect()
}

#[derive(Serialize, Clone, Debug)]
pub struct MerchantExport {
    pub name: String,
    pub merchant_type: String,
    pub deliveries_count: usize,
    pub base_pay_total: f64,
    pub tips_total: f64,
    pub total_earnings: f64,
    pub avg_per_delivery: f64,
    pub visit_count: usize,
}

impl From<&MerchantSummary> for MerchantExport {
    fn from(m: &MerchantSummary) -> Self {
        Self {
            name: m.name.clone(),
            merchant_type: m.merchant_type.label().to_string(),
            deliveries_count: m.deliveries_count,
            base_pay_total: round2(m.base_pay_total),
            tips_total: round2(m.tips_total),
            total_earnings: round2(m.total_earnings),
            avg_per_delivery: round2(m.avg_per_delivery),
            visit_count: m.visit_count,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct WeeklyExport {
    pub week_id: usize,
    pub week_number: u32,
    pub start_date: String,
    pub end_date: String,
    pub earnings: f64,
    pub gas: f64,
    pub net: f64,
    pub deliveries: usize,
    pub dash_minutes: i64,
    pub active_minutes: i64,
    pub time_efficiency_pct: i64,
}

impl From<&WeeklyRollup> for WeeklyExport {
    fn from(w: &WeeklyRollup) -> Self {
        Self {
            week_id: w.id,
            week_number: w.week_number,
            start_date: w.start_date.format("%Y-%m-%d").to_string(),
            end_date: w.end_date.format("%Y-%m-%d").to_string(),
            earnings: round2(w.earnings),
            gas: round2(w.gas),
            net: round2(w.net()),
            deliveries: w.deliveries,
            dash_minutes: w.dash_minutes,
            active_minutes: w.active_minutes,
            time_efficiency_pct: w.time_efficiency_pct(),
        }
    }
}
