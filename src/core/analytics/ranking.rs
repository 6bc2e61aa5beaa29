//! Per-merchant aggregates and the sorted/filtered views built from them.

use super::classifier::classify;
use crate::errors::{AppError, AppResult};
use crate::models::merchant_type::MerchantType;
use crate::models::session::Session;
use crate::models::summary::{LocationCount, MerchantSummary};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Merchant summaries plus the number of deliveries left out of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MerchantReport {
    pub summaries: Vec<MerchantSummary>,
    pub skipped: usize,
}

pub fn build_merchant_summaries(sessions: &[Session]) -> Vec<MerchantSummary> {
    build_merchant_report(sessions).summaries
}

/// Group every well-formed delivery by exact merchant name, in first-seen
/// order. Malformed deliveries (blank name, invalid amounts) are counted in
/// `skipped` instead.
pub fn build_merchant_report(sessions: &[Session]) -> MerchantReport {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<MerchantSummary> = Vec::new();
    let mut visits: HashSet<(usize, NaiveDate)> = HashSet::new();
    let mut skipped = 0;

    for session in sessions {
        for delivery in &session.deliveries {
            if !delivery.is_well_formed() {
                skipped += 1;
                continue;
            }

            let name = delivery.restaurant.as_str();
            let idx = *index.entry(name).or_insert_with(|| {
                summaries.push(MerchantSummary {
                    name: name.to_string(),
                    merchant_type: classify(name),
                    deliveries_count: 0,
                    base_pay_total: 0.0,
                    tips_total: 0.0,
                    total_earnings: 0.0,
                    avg_per_delivery: 0.0,
                    visit_count: 0,
                    dates: Vec::new(),
                });
                summaries.len() - 1
            });

            let entry = &mut summaries[idx];
            entry.deliveries_count += 1;
            entry.base_pay_total += delivery.base_pay;
            entry.tips_total += delivery.tip;
            entry.total_earnings += delivery.total();
            if visits.insert((idx, session.date)) {
                entry.dates.push(session.date);
            }
        }
    }

    for entry in &mut summaries {
        entry.avg_per_delivery = if entry.deliveries_count > 0 {
            entry.total_earnings / entry.deliveries_count as f64
        } else {
            0.0
        };
        entry.visit_count = entry.dates.len();
    }

    if skipped > 0 {
        tracing::warn!(skipped, "malformed deliveries left out of merchant ranking");
    }

    MerchantReport { summaries, skipped }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    MerchantType,
    #[default]
    DeliveriesCount,
    BasePayTotal,
    TipsTotal,
    TotalEarnings,
    AvgPerDelivery,
    VisitCount,
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(SortField::Name),
            "type" | "merchant_type" => Ok(SortField::MerchantType),
            "deliveries" | "deliveries_count" => Ok(SortField::DeliveriesCount),
            "base_pay" | "base_pay_total" => Ok(SortField::BasePayTotal),
            "tips" | "tips_total" => Ok(SortField::TipsTotal),
            "earnings" | "total_earnings" => Ok(SortField::TotalEarnings),
            "avg" | "avg_per_delivery" => Ok(SortField::AvgPerDelivery),
            "visits" | "visit_count" => Ok(SortField::VisitCount),
            other => Err(AppError::InvalidSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

fn compare(a: &MerchantSummary, b: &MerchantSummary, field: SortField) -> Ordering {
    let float = |x: f64, y: f64| x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::MerchantType => a.merchant_type.label().cmp(b.merchant_type.label()),
        SortField::DeliveriesCount => a.deliveries_count.cmp(&b.deliveries_count),
        SortField::BasePayTotal => float(a.base_pay_total, b.base_pay_total),
        SortField::TipsTotal => float(a.tips_total, b.tips_total),
        SortField::TotalEarnings => float(a.total_earnings, b.total_earnings),
        SortField::AvgPerDelivery => float(a.avg_per_delivery, b.avg_per_delivery),
        SortField::VisitCount => a.visit_count.cmp(&b.visit_count),
    }
}

/// Stable sort: equal keys keep their current relative order in both
/// directions.
pub fn sort_by(summaries: &mut [MerchantSummary], field: SortField, direction: SortDirection) {
    summaries.sort_by(|a, b| match direction {
        SortDirection::Ascending => compare(a, b, field),
        SortDirection::Descending => compare(b, a, field),
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MerchantType),
}

impl FromStr for TypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TypeFilter::All)
        } else {
            s.parse::<MerchantType>().map(TypeFilter::Only)
        }
    }
}

pub fn filter_by_type(summaries: Vec<MerchantSummary>, filter: TypeFilter) -> Vec<MerchantSummary> {
    match filter {
        TypeFilter::All => summaries,
        TypeFilter::Only(kind) => summaries
            .into_iter()
            .filter(|m| m.merchant_type == kind)
            .collect(),
    }
}

/// Case-insensitive substring match on the display name.
pub fn filter_by_name(summaries: Vec<MerchantSummary>, term: &str) -> Vec<MerchantSummary> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return summaries;
    }
    summaries
        .into_iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn top_n(mut summaries: Vec<MerchantSummary>, n: usize) -> Vec<MerchantSummary> {
    summaries.truncate(n);
    summaries
}

/// First entry holding the strict maximum of `key`.
fn first_max_by<F>(summaries: &[MerchantSummary], key: F) -> Option<&MerchantSummary>
where
    F: Fn(&MerchantSummary) -> f64,
{
    summaries.iter().fold(None, |best, m| match best {
        Some(b) if key(m) <= key(b) => Some(b),
        _ => Some(m),
    })
}

pub fn most_frequent(summaries: &[MerchantSummary]) -> Option<&MerchantSummary> {
    first_max_by(summaries, |m| m.deliveries_count as f64)
}

pub fn highest_paying(summaries: &[MerchantSummary]) -> Option<&MerchantSummary> {
    first_max_by(summaries, |m| m.avg_per_delivery)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MerchantOverview {
    pub total_merchants: usize,
    pub total_deliveries: usize,
    pub avg_per_delivery: f64,
    pub most_frequent: Option<String>,
    pub highest_paying: Option<String>,
}

pub fn overview(summaries: &[MerchantSummary]) -> MerchantOverview {
    let total_deliveries: usize = summaries.iter().map(|m| m.deliveries_count).sum();
    let total_earnings: f64 = summaries.iter().map(|m| m.total_earnings).sum();

    MerchantOverview {
        total_merchants: summaries.len(),
        total_deliveries,
        avg_per_delivery: if total_deliveries > 0 {
            total_earnings / total_deliveries as f64
        } else {
            0.0
        },
        most_frequent: most_frequent(summaries).map(|m| m.name.clone()),
        highest_paying: highest_paying(summaries).map(|m| m.name.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStats {
    pub merchant_type: MerchantType,
    pub merchants: usize,
    pub deliveries: usize,
    pub earnings: f64,
}

/// Totals per merchant type, in classifier order, for types present only.
pub fn stats_by_type(summaries: &[MerchantSummary]) -> Vec<TypeStats> {
    MerchantType::ALL
        .iter()
        .filter_map(|kind| {
            let group: Vec<&MerchantSummary> = summaries
                .iter()
                .filter(|m| m.merchant_type == *kind)
                .collect();
            if group.is_empty() {
                return None;
            }
            Some(TypeStats {
                merchant_type: *kind,
                merchants: group.len(),
                deliveries: group.iter().map(|m| m.deliveries_count).sum(),
                earnings: group.iter().map(|m| m.total_earnings).sum(),
            })
        })
        .collect()
}

/// Delivery counts per merchant name, most visited first, first-seen order
/// on ties.
pub fn top_locations(sessions: &[Session], limit: usize) -> Vec<LocationCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LocationCount> = Vec::new();

    for delivery in sessions.iter().flat_map(|s| s.deliveries.iter()) {
        if delivery.restaurant.trim().is_empty() {
            continue;
        }
        let name = delivery.restaurant.as_str();
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(LocationCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
