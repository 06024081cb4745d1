//! Numeric limits and default bounds for decoding.

/// Largest integer magnitude held in [`Value::Integer`](crate::Value::Integer)
/// (2^53 - 1). Anything larger decodes to a bignum.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Default maximum nesting of arrays, maps and tags.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Terminates an indefinite-length item.
pub const BREAK: u8 = 0xFF;
