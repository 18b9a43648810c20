//! Render assembled PDF records as a flat CSV.
//!
//! Lets a user export a bank PDF as CSV instead of importing it directly.
//! Fixed four-column layout; debits negative, two decimal places, no
//! thousands separators.

use kobo_core::ParseError;
use rust_decimal::Decimal;

use crate::pdf::{PdfBank, parse_pdf_statement};
use crate::types::RawRecord;

/// Convert assembled records to CSV text with the columns
/// `Transaction Date`, `Narration`, `Amount`, `Running Balance`.
pub fn records_to_csv(records: &[RawRecord]) -> Result<String, ParseError> {
    let render = |e: csv::Error| ParseError::CsvExport(e.to_string());

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Transaction Date", "Narration", "Amount", "Running Balance"])
        .map_err(render)?;

    for record in records {
        let amount = record.signed_amount();
        let balance = record.balance.unwrap_or(Decimal::ZERO);
        writer
            .write_record([
                record.date_text.as_str(),
                record.description.as_str(),
                &format!("{amount:.2}"),
                &format!("{balance:.2}"),
            ])
            .map_err(render)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ParseError::CsvExport(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ParseError::CsvExport(e.to_string()))
}

/// Parse a PDF bank statement and return its transactions as CSV text.
pub fn convert_pdf_statement(
    bytes: &[u8],
    bank: PdfBank,
    password: Option<&str>,
) -> Result<String, ParseError> {
    let records = parse_pdf_statement(bytes, bank, password)?;
    if records.is_empty() {
        return Err(ParseError::NoTransactions);
    }
    records_to_csv(&records)
}
