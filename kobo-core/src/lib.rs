//! kobo-core: canonical transaction model, categorization, error taxonomy,
//! and upload fingerprinting for bank statement imports.

pub mod categorize;
pub mod error;
pub mod fingerprint;
pub mod transaction;

pub use categorize::categorize;
pub use error::ParseError;
pub use fingerprint::{FINGERPRINT_LEN, FingerprintStore, MemoryFingerprintStore, file_fingerprint};
pub use transaction::{BankName, TransactionCategory, TransactionDraft};
