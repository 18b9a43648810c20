//! Row assembler for banks that publish column-table statements.
//!
//! Zenith and GTBank share the same machine: two states, `Idle` and
//! `Open(record)`. Rows either get skipped, open a new record (flushing the
//! previous one), or continue the open record's description. Only the column
//! layout, skip vocabulary, and date shape differ per bank, so those live in
//! a `TableProfile` passed into the assembler.

use std::mem;

use rust_decimal::Decimal;

use crate::amount::clean_amount;
use crate::dates;
use crate::types::{RawRecord, clean_description};

/// Which cell of a short (continuation) row carries description text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationCell {
    /// Fixed column index; rows without that column contribute nothing
    Index(usize),
    /// The row's last cell
    Last,
}

/// Per-bank table layout and vocabulary
#[derive(Debug, Clone)]
pub struct TableProfile {
    /// Rows with fewer columns are continuation candidates
    pub min_columns: usize,
    pub date_col: usize,
    pub desc_col: usize,
    pub debit_col: usize,
    pub credit_col: usize,
    pub balance_col: usize,
    pub continuation: ContinuationCell,
    /// A row containing all of these (joined, lowercased) is a header repeat
    pub header_markers: &'static [&'static str],
    /// A row containing any of these is metadata, not a transaction
    pub skip_phrases: &'static [&'static str],
    /// Literal date-shape test marking a record-start row
    pub is_record_date: fn(&str) -> bool,
    /// Convert the bank's date text to DD/MM/YYYY
    pub normalize_date: fn(&str) -> String,
}

/// Zenith: DATE, DESCRIPTION, DEBIT, CREDIT, VALUE DATE, BALANCE
pub fn zenith_profile() -> TableProfile {
    TableProfile {
        min_columns: 6,
        date_col: 0,
        desc_col: 1,
        debit_col: 2,
        credit_col: 3,
        balance_col: 5,
        continuation: ContinuationCell::Index(1),
        header_markers: &["date", "description", "debit"],
        skip_phrases: &["opening balance", "totals", "total (cleared"],
        is_record_date: dates::is_valid_date_zenith,
        normalize_date: |raw| raw.trim().to_string(),
    }
}

/// GTBank: Trans. Date, Value Date, Reference, Debits, Credits, Balance,
/// Originating Branch, Remarks
pub fn gtbank_profile() -> TableProfile {
    TableProfile {
        min_columns: 7,
        date_col: 0,
        desc_col: 7,
        debit_col: 3,
        credit_col: 4,
        balance_col: 5,
        continuation: ContinuationCell::Last,
        header_markers: &["trans. date", "debits", "credits"],
        skip_phrases: &[
            "opening balance",
            "statement period",
            "branch name",
            "account no",
            "account type",
            "internal reference",
            "currency",
        ],
        is_record_date: dates::is_valid_date_gtbank,
        normalize_date: dates::gtbank_date_to_standard,
    }
}

fn is_skip_row(row: &[String], profile: &TableProfile) -> bool {
    if row.is_empty() || row.iter().all(|cell| cell.trim().is_empty()) {
        return true;
    }
    let joined = row.join(" ").to_lowercase();
    if profile.header_markers.iter().all(|m| joined.contains(m)) {
        return true;
    }
    profile.skip_phrases.iter().any(|p| joined.contains(p))
}

#[derive(Debug)]
enum AssemblerState {
    Idle,
    Open(RawRecord),
}

/// Stateful reducer turning a raw row stream into logical records
#[derive(Debug)]
pub struct TableRowAssembler {
    profile: TableProfile,
    state: AssemblerState,
    records: Vec<RawRecord>,
}

impl TableRowAssembler {
    pub fn new(profile: TableProfile) -> Self {
        Self {
            profile,
            state: AssemblerState::Idle,
            records: Vec::new(),
        }
    }

    /// Feed one row through the transition table.
    pub fn push_row(&mut self, row: &[String]) {
        if is_skip_row(row, &self.profile) {
            return;
        }

        if row.len() < self.profile.min_columns {
            self.continue_short_row(row);
            return;
        }

        let date_cell = row[self.profile.date_col].trim();
        if (self.profile.is_record_date)(date_cell) {
            self.open_record(date_cell, row);
        } else if let AssemblerState::Open(current) = &mut self.state {
            // Full-width row without a date: description continuation
            let fragment = cell(row, self.profile.desc_col);
            if !fragment.is_empty() {
                current.append_description(fragment);
            }
        }
    }

    fn continue_short_row(&mut self, row: &[String]) {
        let AssemblerState::Open(current) = &mut self.state else {
            return;
        };
        let fragment = match self.profile.continuation {
            ContinuationCell::Index(i) => cell(row, i),
            ContinuationCell::Last => row.last().map(|c| c.trim()).unwrap_or(""),
        };
        if !fragment.is_empty() {
            current.append_description(fragment);
        }
    }

    fn open_record(&mut self, date_cell: &str, row: &[String]) {
        self.flush();

        let debit = clean_amount(cell(row, self.profile.debit_col));
        let credit = clean_amount(cell(row, self.profile.credit_col));
        if debit.is_none() && credit.is_none() {
            // A dated row with no usable amount opens nothing
            return;
        }
        let balance = clean_amount(cell(row, self.profile.balance_col));

        self.state = AssemblerState::Open(RawRecord {
            date_text: (self.profile.normalize_date)(date_cell),
            description: clean_description(cell(row, self.profile.desc_col)),
            debit,
            credit,
            balance,
        });
    }

    fn flush(&mut self) {
        if let AssemblerState::Open(record) = mem::replace(&mut self.state, AssemblerState::Idle) {
            self.records.push(record);
        }
    }

    /// End of stream: emit the still-open record, if any.
    pub fn finish(mut self) -> Vec<RawRecord> {
        self.flush();
        self.records
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|c| c.trim()).unwrap_or("")
}

/// Run the assembler over an ordered row stream.
pub fn assemble_rows(rows: impl IntoIterator<Item = Vec<String>>, profile: TableProfile) -> Vec<RawRecord> {
    let mut assembler = TableRowAssembler::new(profile);
    for row in rows {
        assembler.push_row(&row);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_row_merges_into_open_description() {
        let rows = vec![
            row(&["01/12/2024", "PAYMENT TO VENDOR", "500.00", "", "01/12/2024", "1500.00"]),
            row(&["", "ABC LTD INVOICE 123"]),
        ];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "PAYMENT TO VENDOR ABC LTD INVOICE 123");
        assert_eq!(records[0].signed_amount(), dec!(-500.00));
        assert_eq!(records[0].balance, Some(dec!(1500.00)));
    }

    #[test]
    fn test_header_and_metadata_rows_skipped() {
        let rows = vec![
            row(&["DATE", "DESCRIPTION", "DEBIT", "CREDIT", "VALUE DATE", "BALANCE"]),
            row(&["", "Opening Balance", "", "", "", "10,000.00"]),
            row(&["01/12/2024", "NIP TRANSFER", "", "2,500.00", "01/12/2024", "12,500.00"]),
            row(&["", "TOTALS", "2,500.00", "2,500.00", "", ""]),
        ];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].credit, Some(dec!(2500.00)));
    }

    #[test]
    fn test_dated_row_without_amounts_opens_nothing() {
        let rows = vec![
            row(&["01/12/2024", "PENDING", "", "", "01/12/2024", ""]),
            // Continuation that would attach if a record were open
            row(&["", "SHOULD BE DROPPED"]),
            row(&["02/12/2024", "REAL ONE", "100.00", "", "02/12/2024", "900.00"]),
        ];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "REAL ONE");
    }

    #[test]
    fn test_new_date_flushes_previous_record() {
        let rows = vec![
            row(&["01/12/2024", "FIRST", "100.00", "", "01/12/2024", "900.00"]),
            row(&["02/12/2024", "SECOND", "", "200.00", "02/12/2024", "1100.00"]),
        ];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "FIRST");
        assert_eq!(records[1].description, "SECOND");
    }

    #[test]
    fn test_full_width_undated_row_continues() {
        let rows = vec![
            row(&["01/12/2024", "TRANSFER", "100.00", "", "01/12/2024", "900.00"]),
            row(&["", "REF 00123/XYZ", "", "", "", ""]),
        ];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records[0].description, "TRANSFER REF 00123/XYZ");
    }

    #[test]
    fn test_gtbank_layout_and_date_conversion() {
        let rows = vec![
            row(&["Trans. Date", "Value Date", "Reference", "Debits", "Credits", "Balance", "Originating Branch", "Remarks"]),
            row(&["01-Dec-2025", "01-Dec-2025", "REF991", "", "7,000.00", "27,000.00", "IKEJA", "TRANSFER FROM ADA"]),
            row(&["OBI PLC CONTRACT"]),
        ];
        let records = assemble_rows(rows, gtbank_profile());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_text, "01/12/2025");
        assert_eq!(records[0].description, "TRANSFER FROM ADA OBI PLC CONTRACT");
        assert_eq!(records[0].credit, Some(dec!(7000.00)));
    }

    #[test]
    fn test_gtbank_metadata_rows_skipped() {
        let rows = vec![
            row(&["Account No: 0123456789"]),
            row(&["Statement Period: 01-Dec-2025 to 31-Dec-2025"]),
            row(&["01-Dec-2025", "01-Dec-2025", "REF1", "1,000.00", "", "26,000.00", "IKEJA", "POS PURCHASE"]),
        ];
        let records = assemble_rows(rows, gtbank_profile());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].debit, Some(dec!(1000.00)));
    }

    #[test]
    fn test_end_of_stream_flushes_open_record() {
        let rows = vec![row(&["01/12/2024", "LAST ONE", "50.00", "", "01/12/2024", "850.00"])];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_zero_placeholder_amounts_are_absent() {
        // "0.00" debit with a real credit: record opens on the credit
        let rows = vec![
            row(&["01/12/2024", "CREDIT ROW", "0.00", "300.00", "01/12/2024", "1200.00"]),
        ];
        let records = assemble_rows(rows, zenith_profile());
        assert_eq!(records[0].debit, None);
        assert_eq!(records[0].credit, Some(dec!(300.00)));
    }
}
