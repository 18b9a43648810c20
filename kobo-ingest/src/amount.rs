//! Currency amount normalization.
//!
//! Statement cells arrive as "₦12,345.00", "(500.00)", "1,200.00DR", "NGN 50",
//! or junk. Everything unusable maps to None rather than zero, so callers
//! can tell "no amount in this cell" from "amount of zero".

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a currency-formatted cell into an exact decimal.
///
/// Returns None for empty cells, placeholder values ("-", "0.00"), and
/// anything that does not parse as a decimal after cleaning.
pub fn clean_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "0.00" {
        return None;
    }

    // Strip the naira sign, thousands separators, and embedded whitespace
    let mut cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '₦')
        .collect();

    // NGN prefix or suffix
    if cleaned.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("ngn")) {
        cleaned.drain(..3);
    } else if cleaned
        .get(cleaned.len().wrapping_sub(3)..)
        .is_some_and(|s| s.eq_ignore_ascii_case("ngn"))
    {
        cleaned.truncate(cleaned.len() - 3);
    }

    // Parenthesized values are negated
    let mut negate = false;
    if cleaned.starts_with('(') && cleaned.ends_with(')') && cleaned.len() >= 2 {
        negate = true;
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }

    // DR marks a debit; CR is informational only
    let mut debit_suffix = false;
    let suffix = cleaned.get(cleaned.len().wrapping_sub(2)..);
    if suffix.is_some_and(|s| s.eq_ignore_ascii_case("dr")) {
        debit_suffix = true;
        cleaned.truncate(cleaned.len() - 2);
    } else if suffix.is_some_and(|s| s.eq_ignore_ascii_case("cr")) {
        cleaned.truncate(cleaned.len() - 2);
    }

    let mut amount = Decimal::from_str(&cleaned).ok()?;
    if negate {
        amount = -amount;
    }
    if debit_suffix && amount > Decimal::ZERO {
        amount = -amount;
    }
    Some(amount)
}
