//! Keyword-driven transaction categorization.
//!
//! Deterministic: description keywords + amount sign, no learned rules.

use rust_decimal::Decimal;

use crate::transaction::TransactionCategory;

/// Operating expense indicators
const OPERATING_KEYWORDS: &[&str] = &[
    "electricity",
    "utility",
    "internet",
    "phone",
    "rent",
    "office",
    "stationery",
    "maintenance",
    "cleaning",
    "security",
    "insurance",
    "subscription",
    "software",
    "cloud",
    "hosting",
    "airtime",
];

/// Direct (cost-of-sales) expense indicators
const DIRECT_KEYWORDS: &[&str] = &[
    "inventory",
    "stock",
    "goods",
    "materials",
    "supplies",
    "shipping",
    "freight",
    "logistics",
    "delivery",
];

/// Capital expense indicators
const CAPITAL_KEYWORDS: &[&str] = &[
    "equipment",
    "machinery",
    "vehicle",
    "furniture",
    "computer",
    "laptop",
    "phone purchase",
    "asset",
    "renovation",
];

/// Non-deductible indicators
const NON_DEDUCTIBLE_KEYWORDS: &[&str] = &[
    "fine",
    "penalty",
    "personal",
    "donation",
    "gift",
    "entertainment",
];

/// Categorize a transaction from its description and signed amount.
///
/// Any credit is income regardless of wording. Debits are matched against
/// the keyword lists in priority order: non-deductible, capital, direct,
/// operating. Unmatched debits default to operating expenses.
pub fn categorize(description: &str, amount: Decimal) -> TransactionCategory {
    if amount > Decimal::ZERO {
        return TransactionCategory::Income;
    }

    let desc = description.to_lowercase();

    if NON_DEDUCTIBLE_KEYWORDS.iter().any(|k| desc.contains(k)) {
        return TransactionCategory::NonDeductible;
    }
    if CAPITAL_KEYWORDS.iter().any(|k| desc.contains(k)) {
        return TransactionCategory::CapitalExpenses;
    }
    if DIRECT_KEYWORDS.iter().any(|k| desc.contains(k)) {
        return TransactionCategory::DirectExpenses;
    }
    if OPERATING_KEYWORDS.iter().any(|k| desc.contains(k)) {
        return TransactionCategory::OperatingExpenses;
    }

    TransactionCategory::OperatingExpenses
}
