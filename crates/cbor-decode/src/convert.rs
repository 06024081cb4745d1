//! Conversion of decoded values to JSON.
//!
//! Only values with a lossless JSON counterpart convert. Non-finite floats,
//! bignums outside the 64-bit range, tagged values and maps with non-text
//! keys are rejected. Text with unpaired surrogates converts lossily; map
//! keys that collapse to the same string are rejected.

use malachite::Integer;
use serde_json::{Map, Number};

use crate::error::ConvertError;
use crate::model::{TextString, TypedArray, Value};

/// Converts a decoded value to a JSON value.
///
/// `null` and `undefined` both become JSON `null`. Byte strings and typed
/// arrays become arrays of numbers.
pub fn to_json(value: &Value) -> Result<serde_json::Value, ConvertError> {
    let json = match value {
        Value::Null | Value::Undefined => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::from(*n),
        Value::BigInt(n) => bigint_to_json(n).ok_or_else(|| unsupported(value))?,
        Value::Float(x) => float_to_json(*x).ok_or_else(|| unsupported(value))?,
        Value::Bytes(bytes) => bytes.iter().copied().map(serde_json::Value::from).collect(),
        Value::Text(text) => serde_json::Value::String(text.to_string_lossy()),
        Value::Array(items) => items
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                insert_unique(&mut out, k, to_json(v)?)?;
            }
            serde_json::Value::Object(out)
        }
        Value::Map(entries) => {
            let mut out = Map::with_capacity(entries.len());
            for (k, v) in entries {
                let Value::Text(key) = k else {
                    return Err(ConvertError::NonStringKey { kind: k.kind_name() });
                };
                insert_unique(&mut out, key, to_json(v)?)?;
            }
            serde_json::Value::Object(out)
        }
        Value::TypedArray(array) => typed_array_to_json(array).ok_or_else(|| unsupported(value))?,
        Value::Tagged { .. } => return Err(unsupported(value)),
    };
    Ok(json)
}

fn insert_unique(
    out: &mut Map<String, serde_json::Value>,
    key: &TextString,
    value: serde_json::Value,
) -> Result<(), ConvertError> {
    let key = key.to_string_lossy();
    if out.contains_key(&key) {
        return Err(ConvertError::DuplicateKey { key });
    }
    out.insert(key, value);
    Ok(())
}

fn unsupported(value: &Value) -> ConvertError {
    ConvertError::Unsupported {
        kind: value.kind_name(),
    }
}

fn bigint_to_json(n: &Integer) -> Option<serde_json::Value> {
    if let Ok(small) = i64::try_from(n) {
        return Some(small.into());
    }
    u64::try_from(n).ok().map(serde_json::Value::from)
}

fn float_to_json(x: f64) -> Option<serde_json::Value> {
    Number::from_f64(x).map(serde_json::Value::Number)
}

fn typed_array_to_json(array: &TypedArray) -> Option<serde_json::Value> {
    let items: Vec<serde_json::Value> = match array {
        TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => {
            v.iter().copied().map(Into::into).collect()
        }
        TypedArray::Uint16(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Uint32(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Uint64(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Int8(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Int16(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Int32(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Int64(v) => v.iter().copied().map(Into::into).collect(),
        TypedArray::Float32(v) => v
            .iter()
            .map(|x| float_to_json(*x as f64))
            .collect::<Option<_>>()?,
        TypedArray::Float64(v) => v
            .iter()
            .map(|x| float_to_json(*x))
            .collect::<Option<_>>()?,
    };
    Some(serde_json::Value::Array(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::codec::{DecodeOptions, Identity, KeepTags, decode, decode_with};

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_object_converts_in_order() {
        // {"z": 1, "a": [true, null, 1.5]}
        let value = decode(&hex("a2617a01616183f5f6f93e00")).unwrap();
        let json = to_json(&value).unwrap();
        assert_eq!(json, json!({"z": 1, "a": [true, null, 1.5]}));
        assert_eq!(json.to_string(), r#"{"z":1,"a":[true,null,1.5]}"#);
    }

    #[test]
    fn test_bytes_and_typed_arrays_become_number_arrays() {
        assert_eq!(to_json(&Value::Bytes(vec![1, 255])).unwrap(), json!([1, 255]));
        let value = decode(&hex("d84e4801000000ffffffff")).unwrap();
        assert_eq!(to_json(&value).unwrap(), json!([1, -1]));
    }

    #[test]
    fn test_bigints_within_64_bits() {
        let value = decode(&hex("1bffffffffffffffff")).unwrap();
        assert_eq!(to_json(&value).unwrap(), json!(u64::MAX));
        let value = decode(&hex("3b7fffffffffffffff")).unwrap();
        assert_eq!(to_json(&value).unwrap(), json!(i64::MIN));
        let value = decode(&hex("c249010000000000000000")).unwrap();
        assert_eq!(
            to_json(&value),
            Err(ConvertError::Unsupported { kind: "bigint" })
        );
    }

    #[test]
    fn test_rejects_values_without_json_form() {
        assert_eq!(
            to_json(&Value::Float(f64::INFINITY)),
            Err(ConvertError::Unsupported { kind: "float" })
        );
        let bytes = hex("c074323031332d30332d32315432303a30343a30305a");
        let tagged = decode_with(&bytes, KeepTags, DecodeOptions::default()).unwrap();
        assert_eq!(
            to_json(&tagged),
            Err(ConvertError::Unsupported { kind: "tagged value" })
        );
    }

    #[test]
    fn test_map_mode_requires_text_keys() {
        let value = decode_with(&hex("a1616101"), Identity, DecodeOptions::map()).unwrap();
        assert_eq!(to_json(&value).unwrap(), json!({"a": 1}));
        let value = decode_with(&hex("a10101"), Identity, DecodeOptions::map()).unwrap();
        assert_eq!(
            to_json(&value),
            Err(ConvertError::NonStringKey { kind: "integer" })
        );
    }

    #[test]
    fn test_keys_collapsing_to_one_string_are_rejected() {
        // {"\u{d800}": 0, "\u{d801}": 1}
        let bytes = hex("a263eda0800063eda08101");
        for options in [DecodeOptions::default(), DecodeOptions::map()] {
            let value = decode_with(&bytes, Identity, options).unwrap();
            assert_eq!(
                to_json(&value),
                Err(ConvertError::DuplicateKey {
                    key: "\u{fffd}".to_string()
                })
            );
        }
    }
}
