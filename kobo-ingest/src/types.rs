//! Intermediate record type shared by the statement assemblers

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Collapse runs of whitespace/newlines into single spaces and trim.
pub fn clean_description(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw, " ").trim().to_string()
}

/// A transaction as assembled from raw statement rows or lines, before date
/// and amount normalization. Mutable only while its assembler is running:
/// continuation lines append to the description, nothing else changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Date text in DD/MM/YYYY form (bank formats are normalized on assembly)
    pub date_text: String,
    /// Description, grown by continuation lines
    pub description: String,
    /// Outgoing amount, absent when the row carries none
    pub debit: Option<Decimal>,
    /// Incoming amount, absent when the row carries none
    pub credit: Option<Decimal>,
    /// Running balance as reported by the bank (captured, not verified)
    pub balance: Option<Decimal>,
}

impl RawRecord {
    /// Append a continuation fragment with a single separating space.
    pub fn append_description(&mut self, fragment: &str) {
        let fragment = clean_description(fragment);
        if fragment.is_empty() {
            return;
        }
        if self.description.is_empty() {
            self.description = fragment;
        } else {
            self.description.push(' ');
            self.description.push_str(&fragment);
        }
    }

    /// Signed amount: credits positive, debits negative. Zero when the
    /// record has no usable amount (such records are dropped downstream).
    pub fn signed_amount(&self) -> Decimal {
        if let Some(debit) = self.debit {
            if debit > Decimal::ZERO {
                return -debit;
            }
        }
        if let Some(credit) = self.credit {
            if credit > Decimal::ZERO {
                return credit;
            }
        }
        Decimal::ZERO
    }
}
