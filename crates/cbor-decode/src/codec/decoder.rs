//! Recursive-descent decoding of CBOR data items.
//!
//! One call decodes exactly one top-level item and requires the input to be
//! fully consumed. Nothing is retained between calls.

use indexmap::IndexMap;
use malachite::Integer;

use crate::codec::float::decode_f16;
use crate::codec::header::{
    Argument, INFO_F16, INFO_F32, INFO_F64, MajorType, additional_info, read_argument,
};
use crate::codec::primitives::Reader;
use crate::codec::tag::{
    Identity, TAG_NEGATIVE_BIGNUM, TAG_POSITIVE_BIGNUM, Tagger, bignum_from_be_bytes,
};
use crate::codec::text::transcode_utf8;
use crate::error::DecodeError;
use crate::limits::{BREAK, DEFAULT_MAX_DEPTH, MAX_SAFE_INTEGER};
use crate::model::key::{KeyIndex, object_key};
use crate::model::{TextString, TypedArray, TypedArrayKind, Value};

/// How maps are represented in the decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictionaryMode {
    /// String-keyed record ([`Value::Object`]). Keys are converted to their
    /// string form; keys without one are rejected.
    #[default]
    Object,
    /// Ordered key/value pairs with arbitrary keys ([`Value::Map`]).
    Map,
}

/// Options for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Representation of decoded maps.
    pub dictionary: DictionaryMode,
    /// Maximum nesting of arrays, maps and tags.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            dictionary: DictionaryMode::Object,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default options (object dictionaries).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that decode maps as [`Value::Map`].
    pub fn map() -> Self {
        Self {
            dictionary: DictionaryMode::Map,
            ..Self::default()
        }
    }

    /// Sets the dictionary representation.
    pub fn with_dictionary(mut self, dictionary: DictionaryMode) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes a single CBOR item with the default tagger and options.
///
/// ```rust
/// use cbor_decode::{decode, Value};
///
/// let value = decode(&[0x83, 0x01, 0x02, 0x03]).unwrap();
/// assert_eq!(value, Value::Array(vec![1i64.into(), 2i64.into(), 3i64.into()]));
/// ```
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    Decoder::new(input).decode()
}

/// Decodes a single CBOR item with a custom tagger and options.
pub fn decode_with<T: Tagger>(
    input: &[u8],
    tagger: T,
    options: DecodeOptions,
) -> Result<Value, DecodeError> {
    Decoder::with_tagger(input, tagger, options).decode()
}

/// Single-use decoder over one input buffer.
#[derive(Debug)]
pub struct Decoder<'a, T = Identity> {
    reader: Reader<'a>,
    tagger: T,
    options: DecodeOptions,
    depth: usize,
}

impl<'a> Decoder<'a, Identity> {
    /// Creates a decoder with the default tagger and options.
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_tagger(input, Identity, DecodeOptions::default())
    }
}

impl<'a, T: Tagger> Decoder<'a, T> {
    /// Creates a decoder with a custom tagger and options.
    pub fn with_tagger(input: &'a [u8], tagger: T, options: DecodeOptions) -> Self {
        Self {
            reader: Reader::new(input),
            tagger,
            options,
            depth: 0,
        }
    }

    /// Decodes the top-level item, failing if any bytes are left over.
    pub fn decode(mut self) -> Result<Value, DecodeError> {
        let value = self.decode_item()?;
        if !self.reader.is_empty() {
            return Err(DecodeError::RemainingBytes {
                remaining: self.reader.remaining_len(),
                offset: self.reader.position(),
            });
        }
        Ok(value)
    }

    fn decode_item(&mut self) -> Result<Value, DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::NestingTooDeep {
                max: self.options.max_depth,
                offset: self.reader.position(),
            });
        }
        self.depth += 1;
        let result = self.decode_item_inner();
        self.depth -= 1;
        result
    }

    fn decode_item_inner(&mut self) -> Result<Value, DecodeError> {
        let offset = self.reader.position();
        let header = self.reader.read_u8("header")?;
        let major = MajorType::from_header(header);
        let info = additional_info(header);

        if major == MajorType::Simple {
            match info {
                INFO_F16 => {
                    let bits = self.reader.read_u16("float16")?;
                    return Ok(Value::Float(decode_f16(bits) as f64));
                }
                INFO_F32 => return Ok(Value::Float(self.reader.read_f32("float32")? as f64)),
                INFO_F64 => return Ok(Value::Float(self.reader.read_f64("float64")?)),
                _ => {}
            }
        }

        let argument = read_argument(&mut self.reader, info, offset)?;
        let length = match argument {
            Argument::Definite(n) => Some(n),
            Argument::Indefinite if major.allows_indefinite() => None,
            Argument::Indefinite => return Err(DecodeError::InvalidLength { major, offset }),
        };

        match (major, length) {
            (MajorType::Unsigned, Some(n)) => Ok(Value::from(n)),
            (MajorType::Negative, Some(n)) => Ok(negative_integer(n)),
            (MajorType::Bytes, length) => self.decode_bytes(length).map(Value::Bytes),
            (MajorType::Text, length) => self.decode_text(length).map(Value::Text),
            (MajorType::Array, length) => self.decode_array(length),
            (MajorType::Map, length) => self.decode_map(length),
            (MajorType::Tag, Some(tag)) => self.decode_tagged(tag, offset),
            (MajorType::Simple, Some(n)) => Ok(simple_value(n)),
            (major, None) => Err(DecodeError::InvalidLength { major, offset }),
        }
    }

    fn decode_bytes(&mut self, length: Option<u64>) -> Result<Vec<u8>, DecodeError> {
        match length {
            Some(n) => Ok(self.reader.read_bytes(to_len(n), "byte string")?.to_vec()),
            None => {
                let mut out = Vec::new();
                while let Some(n) = self.next_chunk(MajorType::Bytes)? {
                    out.extend_from_slice(self.reader.read_bytes(n, "byte string chunk")?);
                }
                Ok(out)
            }
        }
    }

    fn decode_text(&mut self, length: Option<u64>) -> Result<TextString, DecodeError> {
        let mut units = Vec::new();
        match length {
            Some(n) => self.transcode_chunk(to_len(n), &mut units)?,
            None => {
                while let Some(n) = self.next_chunk(MajorType::Text)? {
                    self.transcode_chunk(n, &mut units)?;
                }
            }
        }
        Ok(TextString::from_units(units))
    }

    fn transcode_chunk(&mut self, len: usize, units: &mut Vec<u16>) -> Result<(), DecodeError> {
        let base = self.reader.position();
        let bytes = self.reader.read_bytes(len, "text string")?;
        transcode_utf8(bytes, base, units)
    }

    /// Reads the header of the next chunk of an indefinite string.
    ///
    /// Returns `None` at the break byte. Chunks must be definite-length and of
    /// the same major type as the enclosing string.
    fn next_chunk(&mut self, expected: MajorType) -> Result<Option<usize>, DecodeError> {
        let offset = self.reader.position();
        let header = self.reader.read_u8("string chunk")?;
        if header == BREAK {
            return Ok(None);
        }
        let argument = read_argument(&mut self.reader, additional_info(header), offset)?;
        let found = MajorType::from_header(header);
        match argument {
            Argument::Definite(n) if found == expected => Ok(Some(to_len(n))),
            _ => Err(DecodeError::InvalidIndefiniteLengthElement {
                expected,
                found,
                offset,
            }),
        }
    }

    fn decode_array(&mut self, length: Option<u64>) -> Result<Value, DecodeError> {
        let items = match length {
            Some(n) => {
                let count = to_len(n);
                // Every item takes at least one byte.
                let mut items = Vec::with_capacity(count.min(self.reader.remaining_len()));
                for _ in 0..count {
                    items.push(self.decode_item()?);
                }
                items
            }
            None => {
                let mut items = Vec::new();
                while !self.reader.try_break() {
                    items.push(self.decode_item()?);
                }
                items
            }
        };
        Ok(Value::Array(items))
    }

    fn decode_map(&mut self, length: Option<u64>) -> Result<Value, DecodeError> {
        // Every entry takes at least two bytes.
        let capacity = length.map_or(0, |n| to_len(n).min(self.reader.remaining_len() / 2));
        match self.options.dictionary {
            DictionaryMode::Object => {
                let mut map = IndexMap::with_capacity(capacity);
                self.decode_entries(length, |decoder, key, offset| {
                    let name = object_key(&key).ok_or(DecodeError::InvalidObjectKey {
                        kind: key.kind_name(),
                        offset,
                    })?;
                    if map.contains_key(&name) {
                        return Err(DecodeError::DuplicateKey { offset });
                    }
                    let value = decoder.decode_item()?;
                    map.insert(name, value);
                    Ok(())
                })?;
                Ok(Value::Object(map))
            }
            DictionaryMode::Map => {
                let mut entries = Vec::with_capacity(capacity);
                let mut index = KeyIndex::with_capacity(capacity);
                self.decode_entries(length, |decoder, key, offset| {
                    if !index.insert(&entries, &key) {
                        return Err(DecodeError::DuplicateKey { offset });
                    }
                    let value = decoder.decode_item()?;
                    entries.push((key, value));
                    Ok(())
                })?;
                Ok(Value::Map(entries))
            }
        }
    }

    /// Decodes map keys until the count or break is reached, handing each key
    /// and its offset to `entry`, which decodes the value.
    fn decode_entries<F>(&mut self, length: Option<u64>, mut entry: F) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self, Value, usize) -> Result<(), DecodeError>,
    {
        let mut remaining = length;
        loop {
            match remaining.as_mut() {
                Some(0) => break,
                Some(n) => *n -= 1,
                None => {
                    if self.reader.try_break() {
                        break;
                    }
                }
            }
            let offset = self.reader.position();
            let key = self.decode_item()?;
            entry(self, key, offset)?;
        }
        Ok(())
    }

    fn decode_tagged(&mut self, tag: u64, offset: usize) -> Result<Value, DecodeError> {
        let payload = self.decode_item()?;
        let Value::Bytes(bytes) = payload else {
            return Ok(self.tagger.tag(tag, payload));
        };

        match tag {
            TAG_POSITIVE_BIGNUM => Ok(Value::BigInt(bignum_from_be_bytes(&bytes, false))),
            TAG_NEGATIVE_BIGNUM => Ok(Value::BigInt(bignum_from_be_bytes(&bytes, true))),
            _ => match TypedArrayKind::from_tag(tag) {
                Some(kind) => TypedArray::from_le_bytes(kind, &bytes)
                    .map(Value::TypedArray)
                    .ok_or(DecodeError::InvalidTypedArrayLength {
                        tag,
                        len: bytes.len(),
                        width: kind.element_width(),
                        offset,
                    }),
                None => Ok(self.tagger.tag(tag, Value::Bytes(bytes))),
            },
        }
    }
}

/// Converts a wire length to `usize`.
///
/// Lengths beyond the address space saturate; the following read then fails
/// as truncated input.
#[inline]
fn to_len(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Value of major type 1 with argument `n`: `-1 - n`.
fn negative_integer(n: u64) -> Value {
    if n <= MAX_SAFE_INTEGER {
        Value::Integer(-1 - n as i64)
    } else {
        Value::BigInt(Integer::from(-1) - Integer::from(n))
    }
}

/// Value of major type 7 with a non-float argument.
fn simple_value(n: u64) -> Value {
    match n {
        20 => Value::Bool(false),
        21 => Value::Bool(true),
        22 => Value::Null,
        23 => Value::Undefined,
        _ => Value::Integer(n as i64),
    }
}
