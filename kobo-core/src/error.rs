//! Error taxonomy for statement parsing.
//!
//! Only document-level failures surface here. Row-level anomalies (bad date,
//! empty description, unusable amount) are skip outcomes inside the parsers
//! and never abort an upload.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// CSV header lacks resolvable date/description columns, or lacks any
    /// amount source. Aborts the whole upload.
    #[error("could not detect statement format: {0}")]
    FormatDetection(String),

    /// The document produced zero canonical drafts.
    #[error("no valid transactions found in statement")]
    NoTransactions,

    /// The PDF requires a password that is missing or incorrect. Kept
    /// distinct so callers can prompt for a password instead of showing a
    /// generic failure.
    #[error("statement is password-protected and the password is missing or incorrect")]
    Decryption,

    /// The upload's fingerprint is already recorded; nothing was parsed or
    /// persisted.
    #[error("this file has already been imported (fingerprint {0})")]
    DuplicateFile(String),

    /// The PDF document could not be read or its text extracted.
    #[error("failed to read PDF statement: {0}")]
    PdfExtraction(String),

    /// The CSV export could not be rendered.
    #[error("failed to render CSV export: {0}")]
    CsvExport(String),
}
