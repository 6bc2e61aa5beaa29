use serde::{Deserialize, Serialize};

/// One completed order within a session.
///
/// The order total is never stored: [`Delivery::total`] derives it from
/// `base_pay + tip` every time it is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub restaurant: String,
    pub base_pay: f64,
    pub tip: f64,
}

impl Delivery {
    pub fn new(restaurant: impl Into<String>, base_pay: f64, tip: f64) -> Self {
        Self {
            restaurant: restaurant.into(),
            base_pay,
            tip,
        }
    }

    pub fn total(&self) -> f64 {
        self.base_pay + self.tip
    }

    /// Both amounts are finite and non-negative.
    pub fn has_valid_amounts(&self) -> bool {
        self.base_pay.is_finite() && self.tip.is_finite() && self.base_pay >= 0.0 && self.tip >= 0.0
    }

    /// Usable for merchant aggregates: named, with valid amounts.
    pub fn is_well_formed(&self) -> bool {
        !self.restaurant.trim().is_empty() && self.has_valid_amounts()
    }
}
