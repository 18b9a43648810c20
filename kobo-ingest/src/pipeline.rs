//! Import pipeline: strategy dispatch, normalization, and the dedup gate.
//!
//! One upload is one synchronous, in-memory transform. The fingerprint is
//! computed over the raw bytes before any parsing, and drafts come out in
//! document order. Persistence stays with the caller: drafts are only worth
//! storing after the dedup check passes and the whole document parsed.

use kobo_core::{
    FingerprintStore, ParseError, TransactionDraft, categorize, file_fingerprint,
};

use crate::csv_import;
use crate::dates::parse_statement_date;
use crate::pdf::{self, PdfBank};
use crate::types::RawRecord;

/// How the upload's bytes should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    Pdf(PdfBank),
    Csv { bank: Option<kobo_core::BankName> },
}

/// One uploaded statement document. Immutable; owned by the pipeline call.
#[derive(Debug, Clone)]
pub struct StatementUpload {
    pub bytes: Vec<u8>,
    pub format: StatementFormat,
    /// Decryption secret for protected PDFs; ignored for CSV
    pub password: Option<String>,
}

impl StatementUpload {
    pub fn pdf(bytes: Vec<u8>, bank: PdfBank, password: Option<String>) -> Self {
        Self {
            bytes,
            format: StatementFormat::Pdf(bank),
            password,
        }
    }

    pub fn csv(bytes: Vec<u8>, bank: Option<kobo_core::BankName>) -> Self {
        Self {
            bytes,
            format: StatementFormat::Csv { bank },
            password: None,
        }
    }
}

/// Result of a successful parse
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// Fingerprint of the raw upload, shared by every draft
    pub fingerprint: String,
    /// Canonical drafts in document order
    pub drafts: Vec<TransactionDraft>,
}

/// Parse an upload into canonical drafts without consulting any dedup store.
pub fn parse_statement(upload: &StatementUpload) -> Result<ParseOutput, ParseError> {
    parse_with_fingerprint(upload, file_fingerprint(&upload.bytes))
}

fn parse_with_fingerprint(
    upload: &StatementUpload,
    fingerprint: String,
) -> Result<ParseOutput, ParseError> {
    let drafts = match &upload.format {
        StatementFormat::Csv { bank } => {
            let content = std::str::from_utf8(&upload.bytes).map_err(|_| {
                ParseError::FormatDetection(
                    "CSV is not valid UTF-8; re-export the statement as UTF-8".to_string(),
                )
            })?;
            csv_import::parse_csv_statement(content, *bank)?
        }
        StatementFormat::Pdf(bank) => {
            let records =
                pdf::parse_pdf_statement(&upload.bytes, *bank, upload.password.as_deref())?;
            normalize_records(records, *bank)?
        }
    };

    let drafts = drafts
        .into_iter()
        .map(|mut draft| {
            draft.file_hash = Some(fingerprint.clone());
            draft
        })
        .collect();

    Ok(ParseOutput { fingerprint, drafts })
}

/// Parse an upload, rejecting byte-identical re-uploads before any parsing.
pub fn import_statement(
    upload: &StatementUpload,
    store: &dyn FingerprintStore,
) -> Result<ParseOutput, ParseError> {
    let fingerprint = file_fingerprint(&upload.bytes);
    if store.contains(&fingerprint) {
        return Err(ParseError::DuplicateFile(fingerprint));
    }
    parse_with_fingerprint(upload, fingerprint)
}

/// Normalize assembled PDF records into drafts. Rows with an invalid date,
/// empty description, or no usable amount are dropped, not fatal.
fn normalize_records(
    records: Vec<RawRecord>,
    bank: PdfBank,
) -> Result<Vec<TransactionDraft>, ParseError> {
    let mut drafts = Vec::new();

    for record in records {
        let Some(date) = parse_statement_date(&record.date_text) else {
            log::debug!("dropping record with unparsable date {:?}", record.date_text);
            continue;
        };
        if record.description.is_empty() {
            log::debug!("dropping record with empty description on {date}");
            continue;
        }
        let amount = record.signed_amount();
        if amount.is_zero() {
            log::debug!("dropping zero-amount record on {date}");
            continue;
        }

        let category = categorize(&record.description, amount);
        drafts.push(TransactionDraft::new(
            date,
            record.description,
            amount,
            category,
            Some(bank.bank_name()),
            "Imported from bank statement",
        ));
    }

    if drafts.is_empty() {
        return Err(ParseError::NoTransactions);
    }
    Ok(drafts)
}
