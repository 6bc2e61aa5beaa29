//! Scalar summary metrics and the display totals built on top of them.

use crate::models::session::Session;
use crate::models::summary::SummaryMetrics;
use serde::Serialize;

/// `round(active / dash * 100)`, or 0 without dash time. Not clamped.
pub fn time_efficiency_pct(active_minutes: i64, dash_minutes: i64) -> i64 {
    if dash_minutes <= 0 {
        return 0;
    }
    (active_minutes as f64 / dash_minutes as f64 * 100.0).round() as i64
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn compute_summary(sessions: &[Session]) -> SummaryMetrics {
    if sessions.is_empty() {
        return SummaryMetrics::default();
    }

    let mut m = SummaryMetrics::default();

    for s in sessions {
        m.total_earnings += s.earnings();
        m.total_gas += s.gas();
        m.deliveries_made += s.deliveries_count();
        m.total_dash_minutes += s.dash_minutes();
        m.total_active_minutes += s.active_minutes();
        if s.deliveries_count() > 0 {
            m.session_count += 1;
        }
    }

    m.total_net = m.total_earnings - m.total_gas;
    m.avg_per_delivery = ratio(m.total_net, m.deliveries_made as f64);
    m.avg_per_session = ratio(m.total_earnings, m.session_count as f64);
    m.avg_per_hour = ratio(m.total_earnings, m.total_dash_minutes as f64 / 60.0);
    m.time_efficiency_pct = time_efficiency_pct(m.total_active_minutes, m.total_dash_minutes);

    tracing::debug!(
        sessions = sessions.len(),
        deliveries = m.deliveries_made,
        "computed summary metrics"
    );
    m
}

/// Flat "challenge" credit added once to an aggregate display total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChallengeBonus(f64);

impl ChallengeBonus {
    pub const DEFAULT: ChallengeBonus = ChallengeBonus(50.0);
    pub const NONE: ChallengeBonus = ChallengeBonus(0.0);

    /// Negative or non-finite amounts disable the bonus.
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self(amount)
        } else {
            Self::NONE
        }
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl Default for ChallengeBonus {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Figures shown to the user for one aggregate view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTotals {
    pub metrics: SummaryMetrics,
    pub bonus: f64,
    pub display_earnings: f64,
    pub display_net: f64,
}

impl DisplayTotals {
    pub fn new(metrics: &SummaryMetrics, bonus: ChallengeBonus) -> Self {
        Self {
            metrics: metrics.clone(),
            bonus: bonus.amount(),
            display_earnings: metrics.total_earnings + bonus.amount(),
            display_net: metrics.total_net + bonus.amount(),
        }
    }
}
