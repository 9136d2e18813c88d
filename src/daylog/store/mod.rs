//! # Persistence layer
//!
//! The journal talks to storage through the [`StorageGateway`] trait: one
//! byte-oriented slot holding the full record sequence as a JSON array.
//!
//! Abstracting the slot behind a trait keeps the journal testable
//! ([`memory::MemoryGateway`]) and the backend swappable
//! ([`fs::FileGateway`] in production).
//!
//! ## Contract
//!
//! - `save` serializes the whole sequence and may fail with
//!   [`DaylogError::StorageQuotaExceeded`] when the slot's capacity would be
//!   breached. Nothing else about a failed save is observable.
//! - `load` never fails upward: a missing, corrupt, or non-array slot yields
//!   an empty sequence, and every element is re-normalized on the way in, so
//!   whatever comes out satisfies the record invariants.

use crate::error::{DaylogError, Result};
use crate::model::Record;
use crate::normalize;
use serde_json::Value;

pub mod fs;
pub mod memory;

/// Abstract interface for the single persistence slot.
pub trait StorageGateway {
    /// Serialize and store the full record sequence.
    fn save(&mut self, records: &[Record]) -> Result<()>;

    /// Load and normalize the stored sequence. Missing or corrupt data is an
    /// empty sequence, never an error.
    fn load(&self) -> Vec<Record>;
}

/// Serialize records the way the slot stores them.
pub fn encode_records(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decode a slot's raw text, dropping anything that does not normalize.
pub fn decode_records(text: &str) -> Vec<Record> {
    let Ok(parsed) = serde_json::from_str::<Value>(text) else {
        return Vec::new();
    };
    let Value::Array(items) = parsed else {
        return Vec::new();
    };
    items.iter().filter_map(normalize::normalize).collect()
}

/// Informational size report for the serialized sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEstimate {
    pub bytes: u64,
    /// Human-scaled size, e.g. `"0.42 MB"`.
    pub megabytes: String,
}

impl std::fmt::Display for SizeEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bytes (~{})", self.bytes, self.megabytes)
    }
}

/// Byte length of the serialized sequence. Purely informational; only
/// `save` enforces capacity.
pub fn estimate_size(records: &[Record]) -> Result<SizeEstimate> {
    let bytes = encode_records(records)?.len() as u64;
    Ok(SizeEstimate {
        bytes,
        megabytes: format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0)),
    })
}

pub(crate) fn check_quota(encoded_len: usize, quota: Option<u64>) -> Result<()> {
    match quota {
        Some(quota) if (encoded_len as u64) > quota => {
            Err(DaylogError::StorageQuotaExceeded {
                need: encoded_len as u64,
                quota,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_tolerates_garbage() {
        assert!(decode_records("").is_empty());
        assert!(decode_records("{not json").is_empty());
        assert!(decode_records("{\"a\":1}").is_empty());
        assert!(decode_records("42").is_empty());
    }

    #[test]
    fn decode_drops_non_object_elements() {
        let text = json!([{ "id": "a", "title": "t" }, 17, "x", null]).to_string();
        let records = decode_records(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "a");
    }

    #[test]
    fn encode_decode_round_trips_canonical_records() {
        let rec = normalize::normalize(&json!({
            "id": "a",
            "date": "2024-01-05",
            "title": "Hello",
            "tags": ["x", "y"],
        }))
        .unwrap();
        let encoded = encode_records(std::slice::from_ref(&rec)).unwrap();
        let decoded = decode_records(&encoded);
        assert_eq!(decoded, vec![rec]);
    }

    #[test]
    fn estimate_reports_bytes_and_megabytes() {
        let est = estimate_size(&[]).unwrap();
        assert_eq!(est.bytes, 2); // "[]"
        assert_eq!(est.megabytes, "0.00 MB");
    }

    #[test]
    fn quota_check_boundaries() {
        assert!(check_quota(100, None).is_ok());
        assert!(check_quota(100, Some(100)).is_ok());
        match check_quota(101, Some(100)) {
            Err(DaylogError::StorageQuotaExceeded { need, quota }) => {
                assert_eq!((need, quota), (101, 100));
            }
            other => panic!("expected quota error, got {other:?}"),
        }
    }
}
