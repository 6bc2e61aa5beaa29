//! Rule-based merchant classification.

use crate::models::merchant_type::MerchantType;

const SHOPPING: &[&str] = &[
    "cvs",
    "walgreens",
    "walmart",
    "target",
    "dollar general",
    "dollar tree",
    "family dollar",
    "rite aid",
    "7-eleven",
    "circle k",
];

const GROCERY: &[&str] = &[
    "kroger",
    "publix",
    "safeway",
    "albertsons",
    "aldi",
    "whole foods",
    "trader joe",
    "wegmans",
    "sprouts",
    "food lion",
    "giant eagle",
    "meijer",
    "h-e-b",
    "shoprite",
];

const FAST_FOOD: &[&str] = &[
    "mcdonald",
    "burger king",
    "wendy",
    "taco bell",
    "kfc",
    "chipotle",
    "subway",
    "pizza hut",
    "domino",
    "popeyes",
    "chick-fil-a",
    "sonic",
    "arby",
    "jimmy john",
    "five guys",
];

/// A single classification rule: any keyword contained in the lowercased
/// merchant name selects `kind`.
#[derive(Debug)]
pub struct Rule {
    pub kind: MerchantType,
    pub keywords: &'static [&'static str],
}

impl Rule {
    pub fn matches(&self, lowercased: &str) -> bool {
        self.keywords.iter().any(|k| lowercased.contains(k))
    }
}

/// Evaluated top to bottom, first match wins.
pub static RULES: [Rule; 3] = [
    Rule {
        kind: MerchantType::Shopping,
        keywords: SHOPPING,
    },
    Rule {
        kind: MerchantType::Grocery,
        keywords: GROCERY,
    },
    Rule {
        kind: MerchantType::FastFood,
        keywords: FAST_FOOD,
    },
];

/// Classify a merchant display name. Unknown names are `Restaurant`.
pub fn classify(merchant_name: &str) -> MerchantType {
    let lower = merchant_name.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.kind)
        .unwrap_or(MerchantType::Restaurant)
}
