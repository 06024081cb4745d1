//! Decoded values.

use std::fmt;

use indexmap::IndexMap;
use malachite::Integer;

use crate::limits::MAX_SAFE_INTEGER;
use crate::model::typed_array::TypedArray;

/// A decoded data item.
///
/// Maps decode to [`Value::Object`] or [`Value::Map`] depending on the
/// [`DictionaryMode`](crate::DictionaryMode) the decoder was given.
///
/// `PartialEq` is structural and follows IEEE 754 for floats, so a value
/// holding NaN is unequal to itself. [`keys_equal`](crate::keys_equal)
/// treats NaN as equal to NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    /// Integer within the 53-bit safe range.
    Integer(i64),
    /// Integer outside the safe range, or a tag 2/3 bignum.
    BigInt(Integer),
    /// Any float, widened to 64 bits.
    Float(f64),
    Bytes(Vec<u8>),
    Text(TextString),
    Array(Vec<Value>),
    /// Map with arbitrary keys, in wire order.
    Map(Vec<(Value, Value)>),
    /// Map with text keys, in wire order.
    Object(IndexMap<TextString, Value>),
    /// Byte string reinterpreted under an RFC 8746 tag.
    TypedArray(TypedArray),
    /// Tag passed through by a tag hook such as [`KeepTags`](crate::KeepTags).
    Tagged { tag: u64, value: Box<Value> },
}

impl Value {
    /// Returns a short human-readable name for the kind of this value.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Bytes(_) => "byte string",
            Value::Text(_) => "text string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::TypedArray(_) => "typed array",
            Value::Tagged { .. } => "tagged value",
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::BigInt(n) => i64::try_from(n).ok(),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is a float or a safe integer.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextString> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a text key in an object or map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(&TextString::from(key)),
            Value::Map(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, Value::Text(t) if t == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u64> for Value {
    /// Picks [`Value::Integer`] when `n` is within the safe range.
    fn from(n: u64) -> Self {
        if n <= MAX_SAFE_INTEGER {
            Value::Integer(n as i64)
        } else {
            Value::BigInt(Integer::from(n))
        }
    }
}

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::BigInt(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(TextString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(TextString::from(s.as_str()))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<TypedArray> for Value {
    fn from(array: TypedArray) -> Self {
        Value::TypedArray(array)
    }
}

/// A text string held as UTF-16 code units.
///
/// Code units are kept exactly as transcoded, so an encoded lone surrogate
/// survives decoding. Use [`TextString::to_string_lossy`] or
/// [`TextString::to_string_checked`] to get a Rust `String`.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextString {
    units: Vec<u16>,
}

impl TextString {
    /// Creates a text string from UTF-16 code units.
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    pub fn into_units(self) -> Vec<u16> {
        self.units
    }

    /// Returns the length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Converts to a `String`, replacing unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }

    /// Converts to a `String`, or `None` if there are unpaired surrogates.
    pub fn to_string_checked(&self) -> Option<String> {
        String::from_utf16(&self.units).ok()
    }
}

impl From<&str> for TextString {
    fn from(s: &str) -> Self {
        Self {
            units: s.encode_utf16().collect(),
        }
    }
}

impl From<String> for TextString {
    fn from(s: String) -> Self {
        TextString::from(s.as_str())
    }
}

impl PartialEq<str> for TextString {
    fn eq(&self, other: &str) -> bool {
        self.units.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for TextString {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Display for TextString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.units.iter().copied()) {
            fmt::Write::write_char(f, c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u64_switches_to_bigint() {
        assert_eq!(Value::from(MAX_SAFE_INTEGER), Value::Integer(9_007_199_254_740_991));
        assert_eq!(
            Value::from(MAX_SAFE_INTEGER + 1),
            Value::BigInt(Integer::from(9_007_199_254_740_992u64))
        );
    }

    #[test]
    fn test_text_string_compares_with_str() {
        let text = TextString::from("\u{10151}x");
        assert_eq!(text.len(), 3);
        assert_eq!(text, "\u{10151}x");
        assert_ne!(text, "x");
        assert_eq!(text.to_string(), "\u{10151}x");
    }

    #[test]
    fn test_lone_surrogate() {
        let text = TextString::from_units(vec![0x61, 0xd800]);
        assert_eq!(text.to_string_checked(), None);
        assert_eq!(text.to_string_lossy(), "a\u{fffd}");
        assert_eq!(format!("{text:?}"), "\"a\u{fffd}\"");
    }

    #[test]
    fn test_get_by_text_key() {
        let map = Value::Map(vec![
            (Value::Integer(1), Value::Integer(2)),
            (Value::from("a"), Value::Integer(3)),
        ]);
        assert_eq!(map.get("a"), Some(&Value::Integer(3)));
        assert_eq!(map.get("b"), None);

        let mut object = IndexMap::new();
        object.insert(TextString::from("k"), Value::Null);
        assert_eq!(Value::Object(object).get("k"), Some(&Value::Null));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(-3).as_i64(), Some(-3));
        assert_eq!(Value::BigInt(Integer::from(5)).as_i64(), Some(5));
        assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::Bytes(vec![1]).as_bytes(), Some(&[1u8][..]));
        assert_eq!(Value::Bytes(vec![]).kind_name(), "byte string");
    }
}
