//! kobo-ingest: statement ingestion. CSV column mapping, bank-specific PDF
//! assemblers, normalization, and the import pipeline.

pub mod amount;
pub mod csv_import;
pub mod dates;
pub mod export;
pub mod pdf;
pub mod pipeline;
pub mod types;

pub use amount::clean_amount;
pub use export::{convert_pdf_statement, records_to_csv};
pub use pdf::{PdfBank, parse_pdf_statement};
pub use pipeline::{ParseOutput, StatementFormat, StatementUpload, import_statement, parse_statement};
pub use types::RawRecord;
