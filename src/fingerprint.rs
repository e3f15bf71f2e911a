//! Content fingerprints for deterministic deduplication.
//!
//! Store handles and cache keys are xxh64 fingerprints of a stable
//! serialization.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: struct fields serialize in declaration order
//! - Stable Vec order: vectors serialize in index order
//! - No HashMap allowed: use BTreeMap for maps in fingerprinted data
//! - Stable float format: f32/f64 serialize consistently

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to stable JSON bytes for fingerprinting.
///
/// Produces deterministic output for the same input.
pub fn to_stable_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("stable serialization failed")
}

/// Compute the xxh64 content fingerprint of a serializable value.
pub fn content_hash<T: Serialize>(value: &T) -> u64 {
    let bytes = to_stable_bytes(value);
    xxh64(&bytes, 0)
}

/// Compute the content fingerprint and return it as a fixed-width hex
/// string.
pub fn content_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", content_hash(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cell::Cell;
    use crate::types::config::Config;

    #[test]
    fn test_determinism() {
        let config = Config::new(Cell::of_volume(3), vec![0, 1, 2]);
        assert_eq!(content_hash(&config), content_hash(&config));
    }

    #[test]
    fn test_distinct_values_get_distinct_hashes() {
        let a = Config::new(Cell::of_volume(3), vec![0, 1, 2]);
        let b = Config::new(Cell::of_volume(3), vec![2, 1, 0]);
        assert_ne!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_hex_is_fixed_width() {
        let cell = Cell::of_volume(7);
        assert_eq!(content_hash_hex(&cell).len(), 16);
    }
}
