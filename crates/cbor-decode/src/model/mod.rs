//! Data model for decoded CBOR items.
//!
//! - Values (the decoded item tree)
//! - Typed arrays (RFC 8746 numeric arrays)
//! - Map key equality
//! - Diagnostic notation

pub mod diagnostic;
pub mod key;
pub mod typed_array;
pub mod value;

pub use key::{keys_equal, object_key};
pub use typed_array::{TypedArray, TypedArrayKind};
pub use value::{TextString, Value};
