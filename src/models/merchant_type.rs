use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MerchantType {
    Shopping,
    Grocery,
    FastFood,
    Restaurant,
}

impl MerchantType {
    pub const ALL: [MerchantType; 4] = [
        MerchantType::Shopping,
        MerchantType::Grocery,
        MerchantType::FastFood,
        MerchantType::Restaurant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MerchantType::Shopping => "Shopping",
            MerchantType::Grocery => "Grocery",
            MerchantType::FastFood => "Fast Food",
            MerchantType::Restaurant => "Restaurant",
        }
    }
}

impl fmt::Display for MerchantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MerchantType {
    type Err = AppError;

    /// Accepts "Fast Food", "FastFood", "fast-food", "fast_food", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "shopping" => Ok(MerchantType::Shopping),
            "grocery" => Ok(MerchantType::Grocery),
            "fastfood" => Ok(MerchantType::FastFood),
            "restaurant" => Ok(MerchantType::Restaurant),
            _ => Err(AppError::InvalidMerchantType(s.to_string())),
        }
    }
}
