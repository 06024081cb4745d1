//! Tag handling: bignums, typed arrays and the caller's tag hook.

use malachite::Integer;

use crate::model::Value;

/// Tag of a positive bignum.
pub const TAG_POSITIVE_BIGNUM: u64 = 2;
/// Tag of a negative bignum.
pub const TAG_NEGATIVE_BIGNUM: u64 = 3;

/// Hook invoked for tags the decoder does not interpret itself.
///
/// Receives the tag number and the already-decoded payload and returns the
/// value to use in its place. Any `FnMut(u64, Value) -> Value` closure is a
/// tagger.
pub trait Tagger {
    fn tag(&mut self, tag: u64, value: Value) -> Value;
}

impl<F> Tagger for F
where
    F: FnMut(u64, Value) -> Value,
{
    fn tag(&mut self, tag: u64, value: Value) -> Value {
        self(tag, value)
    }
}

/// The default tagger: drops the tag and keeps the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Tagger for Identity {
    fn tag(&mut self, _tag: u64, value: Value) -> Value {
        value
    }
}

/// Keeps unknown tags as [`Value::Tagged`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepTags;

impl Tagger for KeepTags {
    fn tag(&mut self, tag: u64, value: Value) -> Value {
        Value::Tagged {
            tag,
            value: Box::new(value),
        }
    }
}

/// Builds a bignum from a big-endian magnitude.
///
/// A negative bignum is `-1 - magnitude`.
pub fn bignum_from_be_bytes(magnitude: &[u8], negative: bool) -> Integer {
    let base = Integer::from(256u32);
    let mut value = Integer::from(0u32);
    for &byte in magnitude {
        value *= &base;
        value += Integer::from(byte);
    }
    if negative {
        Integer::from(-1) - value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bignum_two_to_the_64() {
        let magnitude = [1, 0, 0, 0, 0, 0, 0, 0, 0];
        let expected = Integer::from(u64::MAX) + Integer::from(1u32);
        assert_eq!(bignum_from_be_bytes(&magnitude, false), expected);
        assert_eq!(
            bignum_from_be_bytes(&magnitude, true),
            Integer::from(-1) - expected
        );
        assert_eq!(
            bignum_from_be_bytes(&magnitude, true).to_string(),
            "-18446744073709551617"
        );
    }

    #[test]
    fn test_bignum_empty_magnitude() {
        assert_eq!(bignum_from_be_bytes(&[], false), Integer::from(0u32));
        assert_eq!(bignum_from_be_bytes(&[], true), Integer::from(-1));
    }

    #[test]
    fn test_closure_tagger() {
        let mut seen = Vec::new();
        let mut tagger = |tag: u64, value: Value| {
            seen.push(tag);
            value
        };
        assert_eq!(tagger.tag(7, Value::Null), Value::Null);
        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn test_stock_taggers() {
        assert_eq!(Identity.tag(1, Value::Integer(5)), Value::Integer(5));
        assert_eq!(
            KeepTags.tag(1, Value::Integer(5)),
            Value::Tagged {
                tag: 1,
                value: Box::new(Value::Integer(5))
            }
        );
    }
}
