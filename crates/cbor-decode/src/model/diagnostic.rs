//! Diagnostic notation (RFC 8949 Section 8) for decoded values.

use std::fmt;

use crate::model::typed_array::TypedArray;
use crate::model::value::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::Bytes(bytes) => {
                f.write_str("h'")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("'")
            }
            Value::Text(text) => {
                let json = serde_json::Value::String(text.to_string_lossy());
                write!(f, "{json}")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                write_list(f, items.iter(), |f, item| write!(f, "{item}"))?;
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                write_list(f, entries.iter(), |f, (k, v)| write!(f, "{k}: {v}"))?;
                f.write_str("}")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                write_list(f, map.iter(), |f, (k, v)| {
                    write!(f, "{}: {v}", serde_json::Value::String(k.to_string_lossy()))
                })?;
                f.write_str("}")
            }
            Value::TypedArray(array) => {
                write!(f, "{}[", array.kind().name())?;
                write_typed_elements(f, array)?;
                f.write_str("]")
            }
            Value::Tagged { tag, value } => write!(f, "{tag}({value})"),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("NaN")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{x:?}")
    }
}

fn write_list<I, T>(
    f: &mut fmt::Formatter<'_>,
    items: I,
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result
where
    I: Iterator<Item = T>,
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    Ok(())
}

fn write_typed_elements(f: &mut fmt::Formatter<'_>, array: &TypedArray) -> fmt::Result {
    match array {
        TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => {
            write_list(f, v.iter(), |f, n| write!(f, "{n}"))
        }
        TypedArray::Uint16(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Uint32(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Uint64(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Int8(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Int16(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Int32(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Int64(v) => write_list(f, v.iter(), |f, n| write!(f, "{n}")),
        TypedArray::Float32(v) => write_list(f, v.iter(), |f, x| write_float(f, *x as f64)),
        TypedArray::Float64(v) => write_list(f, v.iter(), |f, x| write_float(f, *x)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indexmap::IndexMap;
    use malachite::Integer;

    use crate::model::value::TextString;

    #[test]
    fn test_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Integer(-100).to_string(), "-100");
        assert_eq!(
            Value::BigInt(Integer::from(18_446_744_073_709_551_615u64)).to_string(),
            "18446744073709551615"
        );
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_strings() {
        assert_eq!(Value::Bytes(vec![0x01, 0xab]).to_string(), "h'01ab'");
        assert_eq!(Value::from("\"\\").to_string(), r#""\"\\""#);
    }

    #[test]
    fn test_aggregates() {
        let value = Value::Array(vec![
            Value::Integer(1),
            Value::Map(vec![(Value::Integer(2), Value::from("b"))]),
            Value::Tagged {
                tag: 1,
                value: Box::new(Value::Integer(1_363_896_240)),
            },
        ]);
        assert_eq!(value.to_string(), r#"[1, {2: "b"}, 1(1363896240)]"#);

        let mut object: IndexMap<TextString, Value> = IndexMap::new();
        object.insert("a".into(), Value::Integer(1));
        object.insert("b".into(), Value::Array(vec![]));
        assert_eq!(Value::Object(object).to_string(), r#"{"a": 1, "b": []}"#);
    }

    #[test]
    fn test_typed_array() {
        let value = Value::TypedArray(TypedArray::Uint16(vec![1, 2, 65535]));
        assert_eq!(value.to_string(), "u16[1, 2, 65535]");
        let value = Value::TypedArray(TypedArray::Float32(vec![0.5]));
        assert_eq!(value.to_string(), "f32[0.5]");
    }
}
