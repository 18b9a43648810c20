//! PDF statement extraction and per-bank dispatch.
//!
//! The bank set is closed: adding a bank means adding a `PdfBank` member and
//! a strategy (a table profile or a text assembler), nothing is pluggable.

pub mod kuda;
pub mod table;

use std::sync::LazyLock;

use kobo_core::{BankName, ParseError};
use regex::Regex;

use crate::types::RawRecord;

/// Banks with a PDF parsing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfBank {
    /// Fixed six-column statement table
    Zenith,
    /// Seven-plus-column table, optionally password-protected
    Gtbank,
    /// Free-form text statement with no table structure
    Kuda,
}

impl PdfBank {
    pub fn bank_name(self) -> BankName {
        match self {
            Self::Zenith => BankName::Zenith,
            Self::Gtbank => BankName::Gtbank,
            Self::Kuda => BankName::Kuda,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "zenith" => Some(Self::Zenith),
            "gtbank" => Some(Self::Gtbank),
            "kuda" => Some(Self::Kuda),
            _ => None,
        }
    }
}

static CELL_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("cell split regex"));

/// Extract the document's plain text, decrypting first when required.
///
/// The `lopdf` document is dropped on every path out of this function,
/// including decryption failure.
fn extract_text(bytes: &[u8], password: Option<&str>) -> Result<String, ParseError> {
    let mut doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ParseError::PdfExtraction(e.to_string()))?;

    if doc.is_encrypted() {
        let password = password.ok_or(ParseError::Decryption)?;
        doc.decrypt(password).map_err(|_| ParseError::Decryption)?;
        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| ParseError::PdfExtraction(e.to_string()))?;
        return pdf_extract::extract_text_from_mem(&decrypted)
            .map_err(|e| classify_extract_error(e.to_string()));
    }

    pdf_extract::extract_text_from_mem(bytes).map_err(|e| classify_extract_error(e.to_string()))
}

/// Extraction failures that mention encryption or passwords are surfaced as
/// [`ParseError::Decryption`] so callers can prompt instead of failing hard.
fn classify_extract_error(message: String) -> ParseError {
    let lower = message.to_lowercase();
    if lower.contains("encrypt") || lower.contains("password") {
        ParseError::Decryption
    } else {
        ParseError::PdfExtraction(message)
    }
}

/// Split extracted text into table-ish rows: one row per line, cells split
/// on runs of two or more spaces (single spaces stay inside a cell).
pub fn rows_from_text(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| {
            CELL_SPLIT_RE
                .split(line.trim())
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

/// Parse a PDF statement into raw records using the bank's strategy.
pub fn parse_pdf_statement(
    bytes: &[u8],
    bank: PdfBank,
    password: Option<&str>,
) -> Result<Vec<RawRecord>, ParseError> {
    let text = extract_text(bytes, password)?;
    let records = match bank {
        PdfBank::Zenith => table::assemble_rows(rows_from_text(&text), table::zenith_profile()),
        PdfBank::Gtbank => table::assemble_rows(rows_from_text(&text), table::gtbank_profile()),
        PdfBank::Kuda => kuda::assemble_lines(text.lines()),
    };
    Ok(records)
}
