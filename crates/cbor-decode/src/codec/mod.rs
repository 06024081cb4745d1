//! Binary decoding of CBOR (RFC 8949).
//!
//! The decoder makes a single pass over the input with no lookahead beyond
//! the current header's argument bytes.

pub mod decoder;
pub mod float;
pub mod header;
pub mod primitives;
pub mod tag;
pub mod text;

pub use decoder::{DecodeOptions, Decoder, DictionaryMode, decode, decode_with};
pub use header::MajorType;
pub use primitives::Reader;
pub use tag::{Identity, KeepTags, Tagger};
