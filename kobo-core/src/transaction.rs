//! Canonical transaction types produced by statement ingestion

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction categories used by the downstream tax rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionCategory {
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Direct Expenses")]
    DirectExpenses,
    #[serde(rename = "Operating Expenses")]
    OperatingExpenses,
    #[serde(rename = "Capital Expenses")]
    CapitalExpenses,
    #[serde(rename = "Non-Deductible")]
    NonDeductible,
}

/// Banks a statement can be attributed to (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BankName {
    #[serde(rename = "Zenith Bank")]
    Zenith,
    #[serde(rename = "GTBank")]
    Gtbank,
    #[serde(rename = "Kuda Bank")]
    Kuda,
    #[serde(rename = "Access Bank")]
    Access,
    #[serde(rename = "UBA")]
    Uba,
    #[serde(rename = "First Bank")]
    FirstBank,
    #[serde(rename = "FCMB")]
    Fcmb,
    #[serde(rename = "Fidelity Bank")]
    Fidelity,
    #[serde(rename = "Sterling Bank")]
    Sterling,
    #[serde(rename = "Wema Bank")]
    Wema,
    #[serde(rename = "Stanbic IBTC")]
    Stanbic,
    #[serde(rename = "Other")]
    Other,
}

impl BankName {
    /// Parse the label used in upload forms / CLI flags. Unknown labels
    /// return None and the import proceeds without a bank attribution.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "zenith" | "zenith bank" => Some(Self::Zenith),
            "gtbank" | "gtb" => Some(Self::Gtbank),
            "kuda" | "kuda bank" => Some(Self::Kuda),
            "access" | "access bank" => Some(Self::Access),
            "uba" => Some(Self::Uba),
            "first bank" | "firstbank" => Some(Self::FirstBank),
            "fcmb" => Some(Self::Fcmb),
            "fidelity" | "fidelity bank" => Some(Self::Fidelity),
            "sterling" | "sterling bank" => Some(Self::Sterling),
            "wema" | "wema bank" => Some(Self::Wema),
            "stanbic" | "stanbic ibtc" => Some(Self::Stanbic),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Fully normalized statement record, ready for persistence by the caller.
/// Immutable once created; the pipeline never updates a finalized draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDraft {
    /// Transaction date
    pub date: NaiveDate,
    /// Single-line description, never empty
    pub description: String,
    /// Positive = credit/income, negative = debit/expense. Never zero.
    pub amount: Decimal,
    /// Category inferred from description and sign
    pub category: TransactionCategory,
    /// Issuing bank, if declared with the upload
    pub bank: Option<BankName>,
    /// Fingerprint of the whole upload; shared by every draft from one file
    pub file_hash: Option<String>,
    /// No receipt is attached at import time
    pub has_receipt: bool,
    /// No vendor/client attribution at import time
    pub vendor_client: Option<String>,
    /// Provenance note
    pub notes: String,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        category: TransactionCategory,
        bank: Option<BankName>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category,
            bank,
            file_hash: None,
            has_receipt: false,
            vendor_client: None,
            notes: notes.into(),
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_draft_defaults() {
        let draft = TransactionDraft::new(
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            "Transfer from client",
            dec!(50000.00),
            TransactionCategory::Income,
            Some(BankName::Zenith),
            "Imported from CSV",
        );
        assert!(draft.is_income());
        assert!(!draft.has_receipt);
        assert_eq!(draft.vendor_client, None);
        assert_eq!(draft.file_hash, None);
    }

    #[test]
    fn test_bank_serde_labels() {
        let json = serde_json::to_string(&BankName::Gtbank).unwrap();
        assert_eq!(json, "\"GTBank\"");
        let json = serde_json::to_string(&TransactionCategory::NonDeductible).unwrap();
        assert_eq!(json, "\"Non-Deductible\"");
    }

    #[test]
    fn test_bank_from_label() {
        assert_eq!(BankName::from_label("Zenith"), Some(BankName::Zenith));
        assert_eq!(BankName::from_label("kuda bank"), Some(BankName::Kuda));
        assert_eq!(BankName::from_label("monzo"), None);
    }
}
