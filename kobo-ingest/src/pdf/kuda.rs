//! Line assembler for Kuda statements, which have no table structure.
//!
//! The extracted text is scanned line by line. A line starting with a
//! DD/MM/YYYY date opens a record; it must carry at least two currency
//! amounts (the first is the transaction amount, the last is the running
//! balance). Every other non-blank line continues the open record's
//! description, after transaction-type keywords are stripped out.

use std::mem;
use std::sync::LazyLock;

use regex::Regex;

use crate::amount::clean_amount;
use crate::types::{RawRecord, clean_description};

static DATE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}/\d{2}/\d{4})\b(.*)$").expect("kuda date regex"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}\s*(.*)$").expect("kuda time regex"));
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"₦?\d{1,3}(?:,\d{3})*\.\d{2}|₦?\d{4,}\.\d{2}").expect("kuda amount regex")
});
static TYPE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(inward transfer|outward transfer|pos transaction|card payment|atm withdrawal|inward|outward|pos)\b",
    )
    .expect("kuda keyword regex")
});

/// Header/footer/summary lines that never carry transaction data
const SKIP_PHRASES: &[&str] = &[
    "statement of account",
    "transaction history",
    "opening balance",
    "closing balance",
    "money in",
    "money out",
    "account name",
    "account number",
    "statement period",
    "date description",
    "generated on",
    "page ",
];

/// Remove transaction-type keywords and collapse whitespace. A line that is
/// exactly a bare keyword reduces to an empty string and contributes nothing.
fn strip_type_keywords(text: &str) -> String {
    clean_description(&TYPE_KEYWORD_RE.replace_all(text, " "))
}

fn is_skip_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    SKIP_PHRASES.iter().any(|p| lower.contains(p))
}

#[derive(Debug)]
enum AssemblerState {
    Idle,
    Open(RawRecord),
}

/// Stateful reducer over the statement's text lines
#[derive(Debug)]
pub struct TextLineAssembler {
    state: AssemblerState,
    records: Vec<RawRecord>,
}

impl Default for TextLineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLineAssembler {
    pub fn new() -> Self {
        Self {
            state: AssemblerState::Idle,
            records: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || is_skip_line(line) {
            return;
        }

        if let Some(caps) = DATE_START_RE.captures(line) {
            let date_text = caps[1].to_string();
            let remainder = caps[2].to_string();
            self.open_record(date_text, &remainder);
            return;
        }

        if let Some(caps) = TIME_RE.captures(line) {
            // Continuation: only the text after the time token counts
            self.continue_with(&caps[1]);
            return;
        }

        self.continue_with(line);
    }

    fn open_record(&mut self, date_text: String, remainder: &str) {
        self.flush();

        let amounts: Vec<&str> = AMOUNT_RE.find_iter(remainder).map(|m| m.as_str()).collect();
        if amounts.len() < 2 {
            // Not enough amounts to tell the transaction from the balance
            return;
        }
        let Some(amount) = clean_amount(amounts[0]) else {
            return;
        };
        let balance = clean_amount(amounts[amounts.len() - 1]);

        let lower = remainder.to_lowercase();
        let (debit, credit) = if lower.contains("inward") {
            (None, Some(amount.abs()))
        } else {
            // "outward" and "pos" mark debits; unmarked lines default to debit
            (Some(amount.abs()), None)
        };

        let description = strip_type_keywords(&AMOUNT_RE.replace_all(remainder, " "));

        self.state = AssemblerState::Open(RawRecord {
            date_text,
            description,
            debit,
            credit,
            balance,
        });
    }

    fn continue_with(&mut self, fragment: &str) {
        let AssemblerState::Open(current) = &mut self.state else {
            return;
        };
        let fragment = strip_type_keywords(fragment);
        if !fragment.is_empty() {
            current.append_description(&fragment);
        }
    }

    fn flush(&mut self) {
        if let AssemblerState::Open(record) = mem::replace(&mut self.state, AssemblerState::Idle) {
            self.records.push(record);
        }
    }

    pub fn finish(mut self) -> Vec<RawRecord> {
        self.flush();
        self.records
    }
}

/// Run the assembler over the statement's lines in order.
pub fn assemble_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<RawRecord> {
    let mut assembler = TextLineAssembler::new();
    for line in lines {
        assembler.push_line(line);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outward_line_opens_debit_record() {
        let records = assemble_lines([
            "01/12/2024 Outward Transfer MAMA NKECHI STORES ₦5,000.00 ₦95,000.00",
        ]);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.date_text, "01/12/2024");
        assert_eq!(r.debit, Some(dec!(5000.00)));
        assert_eq!(r.credit, None);
        assert_eq!(r.balance, Some(dec!(95000.00)));
        assert_eq!(r.description, "MAMA NKECHI STORES");
    }

    #[test]
    fn test_inward_line_is_credit() {
        let records = assemble_lines([
            "02/12/2024 Inward Transfer SALARY OCTOBER ₦150,000.00 ₦245,000.00",
        ]);
        assert_eq!(records[0].credit, Some(dec!(150000.00)));
        assert_eq!(records[0].debit, None);
    }

    #[test]
    fn test_fewer_than_two_amounts_abandons_line() {
        let records = assemble_lines([
            "01/12/2024 Outward Transfer NO BALANCE HERE ₦5,000.00",
            "02/12/2024 POS JUMIA ₦1,000.00 ₦9,000.00",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_text, "02/12/2024");
    }

    #[test]
    fn test_time_line_continues_after_token() {
        let records = assemble_lines([
            "01/12/2024 Outward Transfer ₦5,000.00 ₦95,000.00",
            "10:23:45 MAMA NKECHI STORES",
        ]);
        assert_eq!(records[0].description, "MAMA NKECHI STORES");
    }

    #[test]
    fn test_bare_keyword_line_contributes_nothing() {
        let records = assemble_lines([
            "01/12/2024 Outward Transfer JOHN ₦5,000.00 ₦95,000.00",
            "POS",
            "REF 00123",
        ]);
        assert_eq!(records[0].description, "JOHN REF 00123");
    }

    #[test]
    fn test_header_footer_lines_skipped() {
        let records = assemble_lines([
            "Kuda Statement of Account",
            "Opening Balance: ₦100,000.00",
            "01/12/2024 POS SHOPRITE ₦2,000.00 ₦98,000.00",
            "Page 1 of 3",
            "Closing Balance: ₦98,000.00",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debit, Some(dec!(2000.00)));
    }

    #[test]
    fn test_new_date_line_flushes_open_record() {
        let records = assemble_lines([
            "01/12/2024 Outward Transfer A ₦1,000.00 ₦9,000.00",
            "beneficiary one",
            "02/12/2024 Inward Transfer B ₦2,000.00 ₦11,000.00",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "A beneficiary one");
        assert_eq!(records[1].credit, Some(dec!(2000.00)));
    }

    #[test]
    fn test_end_of_stream_emits_open_record() {
        let records = assemble_lines([
            "01/12/2024 POS PAYMENT SPAR ₦3,500.00 ₦6,500.00",
            "LEKKI BRANCH",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "PAYMENT SPAR LEKKI BRANCH");
    }
}
