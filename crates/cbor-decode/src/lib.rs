//! Single-pass decoder for CBOR (RFC 8949).
//!
//! This crate decodes one CBOR data item from a byte buffer into a [`Value`]
//! tree, rejecting malformed or ambiguous input with a typed error.
//!
//! # Quick Start
//!
//! ```rust
//! use cbor_decode::{decode, decode_with, DecodeOptions, Identity, Value};
//!
//! // {"a": 1, "b": [2, 3]}
//! let bytes = [0xa2, 0x61, 0x61, 0x01, 0x61, 0x62, 0x82, 0x02, 0x03];
//!
//! let value = decode(&bytes).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Integer(1)));
//!
//! // Same input with arbitrary-key maps.
//! let value = decode_with(&bytes, Identity, DecodeOptions::map()).unwrap();
//! assert!(matches!(value, Value::Map(_)));
//! ```
//!
//! # Modules
//!
//! - [`codec`]: Header parsing and the recursive item decoder
//! - [`model`]: Decoded values, typed arrays and key equality
//! - [`convert`]: Conversion of decoded values to JSON
//! - [`error`]: Error types
//! - [`limits`]: Numeric and nesting limits
//!
//! # Decoding rules
//!
//! - Integers up to 2^53 - 1 in magnitude decode as [`Value::Integer`];
//!   larger ones and tag 2/3 bignums decode as [`Value::BigInt`]
//! - Tags 64 to 86 over a byte string decode as [`TypedArray`]s
//! - Other tags are passed to the [`Tagger`] hook
//! - Duplicate map keys, trailing bytes and reserved length codes are errors
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Preallocation is bounded by the bytes remaining in the input
//! - Nesting depth is limited (see [`limits::DEFAULT_MAX_DEPTH`])
//! - Errors carry the byte offset of the offending item

pub mod codec;
pub mod convert;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, Decoder, DictionaryMode, Identity, KeepTags, Tagger, decode, decode_with,
};
pub use convert::to_json;
pub use error::{ConvertError, DecodeError, ErrorKind};
pub use model::{TextString, TypedArray, TypedArrayKind, Value, keys_equal};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
