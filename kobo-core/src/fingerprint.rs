//! Content fingerprinting for duplicate-upload detection.
//!
//! The fingerprint is a pure function of the raw upload bytes: identical
//! files always fingerprint identically, no matter how many records parse
//! out of them. Equality of fingerprints is the sole dedup criterion.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

/// Length in hex characters of a statement fingerprint
pub const FINGERPRINT_LEN: usize = 32;

/// Fingerprint the raw bytes of an uploaded statement.
///
/// SHA-256 of the whole payload, hex-encoded and truncated to
/// [`FINGERPRINT_LEN`] characters.
pub fn file_fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Store of fingerprints from previously imported statements.
///
/// Persistence lives outside this crate; the pipeline only asks whether a
/// fingerprint has been seen before handing drafts to storage.
pub trait FingerprintStore {
    fn contains(&self, fingerprint: &str) -> bool;
}

/// In-memory fingerprint store for tests and the CLI ledger
#[derive(Debug, Default)]
pub struct MemoryFingerprintStore {
    seen: HashSet<String>,
}

impl MemoryFingerprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fingerprint: impl Into<String>) {
        self.seen.insert(fingerprint.into());
    }
}

impl FingerprintStore for MemoryFingerprintStore {
    fn contains(&self, fingerprint: &str) -> bool {
        self.seen.contains(fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = file_fingerprint(b"Date,Description,Amount\n31/12/2024,Rent,-500.00\n");
        let b = file_fingerprint(b"Date,Description,Amount\n31/12/2024,Rent,-500.00\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_single_byte_change_alters_fingerprint() {
        let a = file_fingerprint(b"statement-v1");
        let b = file_fingerprint(b"statement-v2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_is_lowercase_hex() {
        let fp = file_fingerprint(b"anything");
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryFingerprintStore::new();
        let fp = file_fingerprint(b"upload");
        assert!(!store.contains(&fp));
        store.record(fp.clone());
        assert!(store.contains(&fp));
    }
}
