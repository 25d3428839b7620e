//! Permissive decoding for free-form JSON columns.
//!
//! Detail records carry semi-structured sub-objects persisted as JSON. Writes
//! are strict (typed structs serialize cleanly); reads are permissive: a
//! malformed stored value degrades to the type's default instead of failing
//! the whole request.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Decodes a stored JSON value into `T`, falling back to `T::default()` when
/// the column is null or does not match the expected shape.
pub fn decode_or_default<T>(field: &str, value: Option<&Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        None | Some(Value::Null) => T::default(),
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|err| {
            warn!(field, error = %err, "stored JSON did not match expected shape; using default");
            T::default()
        }),
    }
}

/// Decodes a stored JSON value into `Some(T)`, or `None` when absent or
/// malformed.
pub fn decode_opt<T>(field: &str, value: Option<&Value>) -> Option<T>
where
    T: DeserializeOwned,
{
    match value {
        None | Some(Value::Null) => None,
        Some(v) => match serde_json::from_value(v.clone()) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(field, error = %err, "stored JSON did not match expected shape; dropping");
                None
            }
        },
    }
}

/// Serializes a typed sub-object for storage. Serialization of plain data
/// structs cannot fail in practice; a failure is logged and stored as null.
pub fn encode<T: Serialize>(field: &str, value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| {
        warn!(field, error = %err, "failed to serialize JSON field; storing null");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
    struct Sample {
        name: Option<String>,
        qty: Option<i64>,
    }

    #[test]
    fn valid_value_decodes() {
        let value = serde_json::json!({"name": "plate", "qty": 4});
        let sample: Sample = decode_or_default("sample", Some(&value));
        assert_eq!(sample.name.as_deref(), Some("plate"));
        assert_eq!(sample.qty, Some(4));
    }

    #[test]
    fn malformed_value_degrades_to_default() {
        let value = serde_json::json!("not an object");
        let sample: Sample = decode_or_default("sample", Some(&value));
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn null_and_missing_are_default() {
        let null = Value::Null;
        assert_eq!(decode_or_default::<Sample>("sample", Some(&null)), Sample::default());
        assert_eq!(decode_or_default::<Sample>("sample", None), Sample::default());
        assert_eq!(decode_opt::<Sample>("sample", None), None);
    }

    #[test]
    fn encode_round_trips() {
        let sample = Sample {
            name: Some("beam".into()),
            qty: Some(2),
        };
        let value = encode("sample", &sample);
        assert_eq!(decode_opt::<Sample>("sample", Some(&value)), Some(sample));
    }
}
