//! Encoding and decoding of JSON documents stored in text columns.
//!
//! Two policies: required payloads (contract terms) fail the read with a
//! corrupt-state error; display-only payloads (flags, metadata) degrade to
//! an empty value and log the anomaly.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::errors::domain::{DomainError, InfraErrorKind};

pub type Metadata = Map<String, Value>;

pub fn encode<T: Serialize + ?Sized>(value: &T, field: &str) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("failed to encode {field}: {e}"),
        )
    })
}

/// Decode a payload that must be intact.
pub fn decode_required<T: DeserializeOwned>(
    raw: &str,
    field: &str,
    owner_id: Uuid,
) -> Result<T, DomainError> {
    serde_json::from_str(raw).map_err(|e| {
        DomainError::corrupt_state(format!("stored {field} for {owner_id} failed to decode: {e}"))
    })
}

/// Decode a display-only payload, substituting the default on failure.
pub fn decode_or_default<T: DeserializeOwned + Default>(
    raw: &str,
    field: &str,
    owner_id: Uuid,
) -> T {
    if raw.trim().is_empty() {
        return T::default();
    }
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                owner_id = %owner_id,
                field,
                error = %e,
                "stored payload failed to decode; substituting empty value"
            );
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_decode_failure_is_corrupt_state() {
        let err = decode_required::<Value>("{not json", "terms", Uuid::nil()).expect_err("bad");
        assert!(err.is_corrupt_state());
    }

    #[test]
    fn required_decode_preserves_document() {
        let doc = json!({"a": [1, 2, {"b": null}], "c": "text"});
        let raw = encode(&doc, "terms").expect("encode");
        let back: Value = decode_required(&raw, "terms", Uuid::nil()).expect("decode");
        assert_eq!(back, doc);
    }

    #[test]
    fn display_payload_degrades_to_empty() {
        let flags: Vec<String> = decode_or_default("[1, oops", "flags", Uuid::nil());
        assert!(flags.is_empty());
        let meta: Metadata = decode_or_default("\"a string\"", "metadata", Uuid::nil());
        assert!(meta.is_empty());
    }

    #[test]
    fn blank_display_payload_is_empty() {
        let meta: Metadata = decode_or_default("", "metadata", Uuid::nil());
        assert!(meta.is_empty());
    }
}
