//! Map key equality and duplicate detection.
//!
//! Keys compare by value. Numbers compare numerically across integers and
//! floats with SameValueZero semantics (NaN equals NaN, +0 equals -0);
//! bignums only equal bignums; aggregates compare deeply.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::model::typed_array::TypedArray;
use crate::model::value::{TextString, Value};

/// Returns true if two map keys are the same key.
pub fn keys_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Integer(x), Value::Float(y)) | (Value::Float(y), Value::Integer(x)) => {
            same_value_zero(*x as f64, *y)
        }
        (Value::Float(x), Value::Float(y)) => same_value_zero(*x, *y),
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| keys_equal(a, b))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .zip(y)
                    .all(|((ka, va), (kb, vb))| keys_equal(ka, kb) && keys_equal(va, vb))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| keys_equal(v, w)))
        }
        (Value::TypedArray(x), Value::TypedArray(y)) => typed_arrays_equal(x, y),
        (
            Value::Tagged { tag: ta, value: va },
            Value::Tagged { tag: tb, value: vb },
        ) => ta == tb && keys_equal(va, vb),
        _ => false,
    }
}

fn same_value_zero(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

fn typed_arrays_equal(x: &TypedArray, y: &TypedArray) -> bool {
    match (x, y) {
        (TypedArray::Float32(a), TypedArray::Float32(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(p, q)| same_value_zero(*p as f64, *q as f64))
        }
        (TypedArray::Float64(a), TypedArray::Float64(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(p, q)| same_value_zero(*p, *q))
        }
        _ => x == y,
    }
}

/// Hashes a key consistently with [`keys_equal`].
fn hash_key<H: Hasher>(key: &Value, state: &mut H) {
    match key {
        Value::Null => 0u8.hash(state),
        Value::Undefined => 1u8.hash(state),
        Value::Bool(b) => {
            2u8.hash(state);
            b.hash(state);
        }
        Value::Integer(n) => hash_number(*n as f64, state),
        Value::Float(f) => hash_number(*f, state),
        Value::BigInt(n) => {
            4u8.hash(state);
            n.hash(state);
        }
        Value::Bytes(bytes) => {
            5u8.hash(state);
            bytes.hash(state);
        }
        Value::Text(text) => {
            6u8.hash(state);
            text.hash(state);
        }
        Value::Array(items) => {
            7u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_key(item, state);
            }
        }
        Value::Map(entries) => {
            8u8.hash(state);
            entries.len().hash(state);
            for (k, v) in entries {
                hash_key(k, state);
                hash_key(v, state);
            }
        }
        // Object equality ignores entry order, so only the size is hashed.
        Value::Object(map) => {
            9u8.hash(state);
            map.len().hash(state);
        }
        Value::TypedArray(array) => {
            10u8.hash(state);
            array.kind().hash(state);
            array.len().hash(state);
        }
        Value::Tagged { tag, value } => {
            11u8.hash(state);
            tag.hash(state);
            hash_key(value, state);
        }
    }
}

fn hash_number<H: Hasher>(n: f64, state: &mut H) {
    3u8.hash(state);
    let bits = if n == 0.0 {
        0
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    };
    bits.hash(state);
}

/// Index of the keys already inserted into one map.
///
/// Entries live in the caller's vector; the index maps key hashes to entry
/// positions so duplicate checks stay linear in the map size.
#[derive(Debug, Default)]
pub(crate) struct KeyIndex {
    buckets: FxHashMap<u64, Vec<usize>>,
}

impl KeyIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Records `key` as the next entry of `entries`.
    ///
    /// Returns false, recording nothing, if an equal key is already present.
    pub(crate) fn insert(&mut self, entries: &[(Value, Value)], key: &Value) -> bool {
        let mut hasher = FxHasher::default();
        hash_key(key, &mut hasher);
        let bucket = self.buckets.entry(hasher.finish()).or_default();
        if bucket.iter().any(|&i| keys_equal(&entries[i].0, key)) {
            return false;
        }
        bucket.push(entries.len());
        true
    }
}

/// Returns the string form of a key for object-mode maps.
///
/// Text is used as-is, code unit for code unit. Numbers use JavaScript
/// number formatting and the remaining scalars use their literal names. Byte
/// strings and aggregates have no string form.
pub fn object_key(key: &Value) -> Option<TextString> {
    match key {
        Value::Text(text) => Some(text.clone()),
        Value::Integer(n) => Some(n.to_string().into()),
        Value::BigInt(n) => Some(n.to_string().into()),
        Value::Float(f) => Some(js_number_string(*f).into()),
        Value::Bool(b) => Some(b.to_string().into()),
        Value::Null => Some("null".into()),
        Value::Undefined => Some("undefined".into()),
        Value::Bytes(_)
        | Value::Array(_)
        | Value::Map(_)
        | Value::Object(_)
        | Value::TypedArray(_)
        | Value::Tagged { .. } => None,
    }
}

/// Formats a float the way JavaScript's `Number.prototype.toString` does for
/// the common cases.
fn js_number_string(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if f.fract() == 0.0 && magnitude < 1e21 {
        return format!("{}", f as i128);
    }
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{f}");
    }
    // Exponent form: Rust prints "1e21", JavaScript "1e+21".
    let formatted = format!("{f:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use malachite::Integer;

    #[test]
    fn test_numbers_compare_across_kinds() {
        assert!(keys_equal(&Value::Integer(1), &Value::Float(1.0)));
        assert!(keys_equal(&Value::Float(0.0), &Value::Float(-0.0)));
        assert!(keys_equal(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
        assert!(!keys_equal(&Value::Integer(1), &Value::Float(1.5)));
        assert!(!keys_equal(
            &Value::Integer(1),
            &Value::BigInt(Integer::from(1))
        ));
    }

    #[test]
    fn test_aggregates_compare_deeply() {
        let a = Value::Array(vec![Value::Integer(1), Value::from("x")]);
        let b = Value::Array(vec![Value::Float(1.0), Value::from("x")]);
        assert!(keys_equal(&a, &b));
        assert!(!keys_equal(&a, &Value::Array(vec![Value::Integer(1)])));
        assert!(!keys_equal(&Value::Bytes(vec![1]), &Value::Array(vec![Value::Integer(1)])));
    }

    #[test]
    fn test_index_detects_duplicates() {
        let mut entries: Vec<(Value, Value)> = Vec::new();
        let mut index = KeyIndex::with_capacity(4);
        for key in [Value::Integer(1), Value::from("1"), Value::Bytes(vec![1])] {
            assert!(index.insert(&entries, &key));
            entries.push((key, Value::Null));
        }
        assert!(!index.insert(&entries, &Value::Float(1.0)));
        assert!(!index.insert(&entries, &Value::from("1")));
        assert!(!index.insert(&entries, &Value::Bytes(vec![1])));
        assert!(index.insert(&entries, &Value::Bytes(vec![2])));
    }

    #[test]
    fn test_equal_keys_hash_equal() {
        let pairs = [
            (Value::Integer(0), Value::Float(-0.0)),
            (Value::Float(f64::NAN), Value::Float(-f64::NAN)),
            (Value::Integer(7), Value::Float(7.0)),
        ];
        for (a, b) in pairs {
            let mut ha = FxHasher::default();
            let mut hb = FxHasher::default();
            hash_key(&a, &mut ha);
            hash_key(&b, &mut hb);
            assert_eq!(ha.finish(), hb.finish(), "{a:?} vs {b:?}");
        }
    }

    fn key_string(value: Value) -> Option<String> {
        object_key(&value).map(|key| key.to_string_lossy())
    }

    #[test]
    fn test_object_key_forms() {
        assert_eq!(key_string(Value::from("a")).as_deref(), Some("a"));
        assert_eq!(key_string(Value::Integer(-10)).as_deref(), Some("-10"));
        assert_eq!(key_string(Value::Float(1.0)).as_deref(), Some("1"));
        assert_eq!(key_string(Value::Float(1.5)).as_deref(), Some("1.5"));
        assert_eq!(key_string(Value::Float(-0.0)).as_deref(), Some("0"));
        assert_eq!(key_string(Value::Float(1e21)).as_deref(), Some("1e+21"));
        assert_eq!(key_string(Value::Float(1e-7)).as_deref(), Some("1e-7"));
        assert_eq!(key_string(Value::Float(f64::NEG_INFINITY)).as_deref(), Some("-Infinity"));
        assert_eq!(key_string(Value::Bool(true)).as_deref(), Some("true"));
        assert_eq!(key_string(Value::Undefined).as_deref(), Some("undefined"));
        assert_eq!(key_string(Value::Bytes(vec![])), None);
        assert_eq!(key_string(Value::Array(vec![])), None);
    }

    #[test]
    fn test_object_key_keeps_lone_surrogates_distinct() {
        let high = Value::Text(TextString::from_units(vec![0xd800]));
        let low = Value::Text(TextString::from_units(vec![0xd801]));
        assert_eq!(object_key(&high).unwrap().as_units(), &[0xd800]);
        assert_ne!(object_key(&high), object_key(&low));
    }
}
