use crm_core_api::ApiError;
use serde::Serialize;
use twox_hash::XxHash64;

/// Ledger hash of a value: XxHash64 (seed 0) over its CBOR encoding, as i64
/// so it fits a BIGINT column.
pub fn ledger_hash<T: Serialize>(value: &T) -> Result<i64, ApiError> {
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(value, &mut cbor)
        .map_err(|e| ApiError::InvalidState(format!("cannot encode ledger entry: {e}")))?;
    Ok(XxHash64::oneshot(0, &cbor) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        let a = ledger_hash(&("customer", 42u32)).unwrap();
        let b = ledger_hash(&("customer", 42u32)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, ledger_hash(&("customer", 43u32)).unwrap());
    }

    #[test]
    fn test_hash_is_seed_zero_xxhash_of_cbor() {
        let mut cbor = Vec::new();
        ciborium::ser::into_writer(&"NEW", &mut cbor).unwrap();
        assert_eq!(ledger_hash(&"NEW").unwrap(), XxHash64::oneshot(0, &cbor) as i64);
    }
}
