//! Generic CSV statement parsing.
//!
//! Banks export CSVs with arbitrary column ordering and naming, so the
//! header row is mapped to semantic fields by synonym lists before any data
//! row is read. Per-row failures are skip outcomes, not errors.

use kobo_core::{BankName, ParseError, TransactionDraft, categorize};
use rust_decimal::Decimal;

use crate::amount::clean_amount;
use crate::dates::parse_statement_date;

const DATE_COLUMNS: &[&str] = &[
    "date",
    "transaction date",
    "trans date",
    "value date",
    "posting date",
];
const DESCRIPTION_COLUMNS: &[&str] = &[
    "description",
    "narration",
    "particulars",
    "remarks",
    "details",
    "transaction details",
];
const DEBIT_COLUMNS: &[&str] = &["debit", "dr", "withdrawal", "withdrawals", "debit amount"];
const CREDIT_COLUMNS: &[&str] = &[
    "credit",
    "cr",
    "deposit",
    "deposits",
    "credit amount",
    "lodgement",
];
const AMOUNT_COLUMNS: &[&str] = &["amount", "transaction amount", "value"];
const BALANCE_COLUMNS: &[&str] = &["balance", "running balance", "available balance"];

/// Zero-based column indices for the semantic fields of a statement CSV
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub debit: Option<usize>,
    pub credit: Option<usize>,
    pub amount: Option<usize>,
    pub balance: Option<usize>,
}

impl ColumnMapping {
    /// Assign columns from a header row. Each header cell claims at most one
    /// field, tested in priority order; the first matching column wins.
    pub fn detect(headers: &[String]) -> Self {
        let mut mapping = Self::default();

        for (i, header) in headers.iter().enumerate() {
            let header = header.trim().to_lowercase();
            if mapping.date.is_none() && DATE_COLUMNS.iter().any(|c| header.contains(c)) {
                mapping.date = Some(i);
            } else if mapping.description.is_none()
                && DESCRIPTION_COLUMNS.iter().any(|c| header.contains(c))
            {
                mapping.description = Some(i);
            } else if mapping.debit.is_none() && DEBIT_COLUMNS.iter().any(|c| header.contains(c)) {
                mapping.debit = Some(i);
            } else if mapping.credit.is_none() && CREDIT_COLUMNS.iter().any(|c| header.contains(c))
            {
                mapping.credit = Some(i);
            } else if mapping.amount.is_none() && AMOUNT_COLUMNS.iter().any(|c| header.contains(c))
            {
                mapping.amount = Some(i);
            } else if mapping.balance.is_none()
                && BALANCE_COLUMNS.iter().any(|c| header.contains(c))
            {
                mapping.balance = Some(i);
            }
        }

        mapping
    }

    /// A mapping is usable only with date, description, and an amount source.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.date.is_none() {
            return Err(ParseError::FormatDetection(
                "could not find a date column in the CSV header".to_string(),
            ));
        }
        if self.description.is_none() {
            return Err(ParseError::FormatDetection(
                "could not find a description column in the CSV header".to_string(),
            ));
        }
        if self.amount.is_none() && self.debit.is_none() && self.credit.is_none() {
            return Err(ParseError::FormatDetection(
                "could not find amount, debit, or credit columns in the CSV header".to_string(),
            ));
        }
        Ok(())
    }

    /// Largest mapped index; rows shorter than this cannot satisfy the mapping.
    fn max_index(&self) -> usize {
        [
            self.date,
            self.description,
            self.debit,
            self.credit,
            self.amount,
            self.balance,
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0)
    }
}

/// Why an individual data row was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    TooFewColumns,
    InvalidDate,
    EmptyDescription,
    NoUsableAmount,
}

/// Outcome of mapping one data row. Skipping is a visible branch, not a
/// silently dropped row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(TransactionDraft),
    Skipped(SkipReason),
}

/// Map one data row through the column mapping into a draft.
pub fn map_row(row: &[String], mapping: &ColumnMapping, bank: Option<BankName>) -> RowOutcome {
    if row.iter().all(|cell| cell.trim().is_empty()) {
        return RowOutcome::Skipped(SkipReason::Blank);
    }
    if row.len() <= mapping.max_index() {
        return RowOutcome::Skipped(SkipReason::TooFewColumns);
    }

    let cell = |idx: Option<usize>| idx.map(|i| row[i].trim()).unwrap_or("");

    let Some(date) = parse_statement_date(cell(mapping.date)) else {
        return RowOutcome::Skipped(SkipReason::InvalidDate);
    };

    let description = cell(mapping.description);
    if description.is_empty() {
        return RowOutcome::Skipped(SkipReason::EmptyDescription);
    }

    let amount = if mapping.amount.is_some() {
        clean_amount(cell(mapping.amount))
    } else {
        // Combine the two columns: debits forced negative, credits positive
        let debit = clean_amount(cell(mapping.debit))
            .map(|d| if d > Decimal::ZERO { -d } else { d })
            .unwrap_or_default();
        let credit = clean_amount(cell(mapping.credit)).map(|c| c.abs()).unwrap_or_default();
        Some(credit + debit)
    };

    let amount = match amount {
        Some(a) if !a.is_zero() => a,
        _ => return RowOutcome::Skipped(SkipReason::NoUsableAmount),
    };

    let category = categorize(description, amount);
    RowOutcome::Parsed(TransactionDraft::new(
        date,
        description,
        amount,
        category,
        bank,
        "Imported from CSV",
    ))
}

/// Pick the most plausible delimiter from a sample of the content.
/// Comma wins when detection is ambiguous.
fn detect_delimiter(content: &str) -> u8 {
    let sample: String = content.chars().take(2048).collect();
    let candidates = [b',', b';', b'\t', b'|'];
    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in candidates {
        let count = sample.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn read_rows(content: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ParseError::FormatDetection(format!("unreadable CSV: {e}")))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

/// Index of the header row, tolerating leading blank or title rows.
fn find_header_row(rows: &[Vec<String>]) -> usize {
    for (i, row) in rows.iter().enumerate() {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let joined = row.join(" ").to_lowercase();
        if joined.contains("date") || joined.contains("description") || joined.contains("amount") {
            return i;
        }
    }
    0
}

/// Parse a whole statement CSV into canonical drafts, in document order.
pub fn parse_csv_statement(
    content: &str,
    bank: Option<BankName>,
) -> Result<Vec<TransactionDraft>, ParseError> {
    let rows = read_rows(content)?;
    if rows.len() < 2 {
        return Err(ParseError::FormatDetection(
            "CSV must contain at least a header row and one data row".to_string(),
        ));
    }

    let header_idx = find_header_row(&rows);
    let mapping = ColumnMapping::detect(&rows[header_idx]);
    mapping.validate()?;

    let mut drafts = Vec::new();
    for row in &rows[header_idx + 1..] {
        match map_row(row, &mapping, bank) {
            RowOutcome::Parsed(draft) => drafts.push(draft),
            RowOutcome::Skipped(reason) => {
                log::debug!("skipped CSV row ({reason:?}): {row:?}");
            }
        }
    }

    if drafts.is_empty() {
        return Err(ParseError::NoTransactions);
    }
    Ok(drafts)
}
