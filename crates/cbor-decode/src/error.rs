//! Error types for CBOR decoding and value conversion.

use thiserror::Error;

use crate::codec::header::MajorType;

/// Error kinds reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// E001: Additional information in the reserved 28..=30 range
    InvalidLengthEncoding,
    /// E002: Indefinite length on a major type that forbids it
    InvalidLength,
    /// E003: Bad chunk inside an indefinite-length byte/text string
    InvalidIndefiniteLengthElement,
    /// E004: Repeated key within one map
    DuplicateKey,
    /// E005: Bytes left over after the top-level item
    RemainingBytes,
    /// E006: Read past the end of the input
    UnexpectedEndOfInput,
    /// E007: Typed-array payload not a multiple of the element width
    InvalidTypedArrayLength,
    /// E008: Nesting deeper than the configured limit
    NestingTooDeep,
    /// E009: Map key with no string form in object mode
    InvalidObjectKey,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidLengthEncoding => "E001",
            ErrorKind::InvalidLength => "E002",
            ErrorKind::InvalidIndefiniteLengthElement => "E003",
            ErrorKind::DuplicateKey => "E004",
            ErrorKind::RemainingBytes => "E005",
            ErrorKind::UnexpectedEndOfInput => "E006",
            ErrorKind::InvalidTypedArrayLength => "E007",
            ErrorKind::NestingTooDeep => "E008",
            ErrorKind::InvalidObjectKey => "E009",
        }
    }
}

/// Error during binary decoding.
///
/// Every variant records the byte offset where the offending item or read
/// began.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[E001] reserved additional information {info} at offset {offset}")]
    InvalidLengthEncoding { info: u8, offset: usize },

    #[error("[E002] indefinite length not allowed for {major:?} at offset {offset}")]
    InvalidLength { major: MajorType, offset: usize },

    #[error("[E003] invalid chunk in indefinite {expected:?} at offset {offset}: found {found:?}")]
    InvalidIndefiniteLengthElement {
        expected: MajorType,
        found: MajorType,
        offset: usize,
    },

    #[error("[E004] duplicate map key at offset {offset}")]
    DuplicateKey { offset: usize },

    #[error("[E005] {remaining} trailing bytes after top-level item at offset {offset}")]
    RemainingBytes { remaining: usize, offset: usize },

    #[error("[E006] unexpected end of input while reading {context} at offset {offset}")]
    UnexpectedEndOfInput { context: &'static str, offset: usize },

    #[error("[E007] typed array tag {tag} payload length {len} is not a multiple of {width} at offset {offset}")]
    InvalidTypedArrayLength {
        tag: u64,
        len: usize,
        width: usize,
        offset: usize,
    },

    #[error("[E008] nesting exceeds maximum depth {max} at offset {offset}")]
    NestingTooDeep { max: usize, offset: usize },

    #[error("[E009] {kind} cannot be used as an object key at offset {offset}")]
    InvalidObjectKey { kind: &'static str, offset: usize },
}

impl DecodeError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidLengthEncoding { .. } => ErrorKind::InvalidLengthEncoding,
            DecodeError::InvalidLength { .. } => ErrorKind::InvalidLength,
            DecodeError::InvalidIndefiniteLengthElement { .. } => {
                ErrorKind::InvalidIndefiniteLengthElement
            }
            DecodeError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            DecodeError::RemainingBytes { .. } => ErrorKind::RemainingBytes,
            DecodeError::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            DecodeError::InvalidTypedArrayLength { .. } => ErrorKind::InvalidTypedArrayLength,
            DecodeError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            DecodeError::InvalidObjectKey { .. } => ErrorKind::InvalidObjectKey,
        }
    }

    /// Returns the byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::InvalidLengthEncoding { offset, .. }
            | DecodeError::InvalidLength { offset, .. }
            | DecodeError::InvalidIndefiniteLengthElement { offset, .. }
            | DecodeError::DuplicateKey { offset }
            | DecodeError::RemainingBytes { offset, .. }
            | DecodeError::UnexpectedEndOfInput { offset, .. }
            | DecodeError::InvalidTypedArrayLength { offset, .. }
            | DecodeError::NestingTooDeep { offset, .. }
            | DecodeError::InvalidObjectKey { offset, .. } => *offset,
        }
    }
}

/// Error converting a decoded value to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("{kind} has no JSON representation")]
    Unsupported { kind: &'static str },

    #[error("map key of kind {kind} is not a string")]
    NonStringKey { kind: &'static str },

    #[error("distinct map keys both convert to {key:?}")]
    DuplicateKey { key: String },
}
