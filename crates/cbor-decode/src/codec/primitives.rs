//! Primitive reads for the CBOR wire format.
//!
//! All multi-byte quantities are big-endian.

use crate::error::DecodeError;
use crate::limits::BREAK;

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking. The position only ever moves forward.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Err(self.eof(context));
        };
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        self.read_array(context).map(u16::from_be_bytes)
    }

    /// Reads a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.read_array(context).map(u32::from_be_bytes)
    }

    /// Reads a big-endian u64.
    #[inline]
    pub fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        self.read_array(context).map(u64::from_be_bytes)
    }

    /// Reads a big-endian IEEE 754 single.
    #[inline]
    pub fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        self.read_array(context).map(f32::from_be_bytes)
    }

    /// Reads a big-endian IEEE 754 double.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        self.read_array(context).map(f64::from_be_bytes)
    }

    /// Reads exactly n bytes, borrowing them from the input.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(self.eof(context));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consumes a break byte if it is next, reporting whether it was there.
    ///
    /// Never fails: at end of input this returns `false` and the next read
    /// reports the truncation.
    #[inline]
    pub fn try_break(&mut self) -> bool {
        if self.data.get(self.pos) == Some(&BREAK) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_bytes(N, context)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn eof(&self, context: &'static str) -> DecodeError {
        DecodeError::UnexpectedEndOfInput {
            context,
            offset: self.pos,
        }
    }
}
