//! Purpose: Content-derived identity for records the endpoint only knows by position.
//! Exports: `RecordKey`, `locate_by_key`.
//! Role: Lets an action chosen from one listing be re-resolved against a fresh listing.
//! Invariants: Keys depend only on record content (canonical wire JSON), never on position.
//! Invariants: Identical records share a key; resolution picks the first match.

use crate::core::record::ExchangeRecord;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

const KEY_BYTES: usize = 8;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn of(record: &ExchangeRecord) -> Self {
        // Field order is fixed by the struct, so the encoding is canonical.
        let bytes = serde_json::to_vec(record).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        let mut hex = String::with_capacity(KEY_BYTES * 2);
        for byte in digest.iter().take(KEY_BYTES) {
            use std::fmt::Write;
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidRecordKey;

impl fmt::Display for InvalidRecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record keys are {} lowercase hex characters", KEY_BYTES * 2)
    }
}

impl std::error::Error for InvalidRecordKey {}

impl FromStr for RecordKey {
    type Err = InvalidRecordKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.len() != KEY_BYTES * 2 || !normalized.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(InvalidRecordKey);
        }
        Ok(Self(normalized))
    }
}

/// Position of the first record in `records` whose key is `key`.
pub fn locate_by_key(records: &[ExchangeRecord], key: &RecordKey) -> Option<usize> {
    records.iter().position(|record| &RecordKey::of(record) == key)
}
