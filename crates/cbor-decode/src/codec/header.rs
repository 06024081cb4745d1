//! Item headers: major type and argument decoding.

use crate::codec::primitives::Reader;
use crate::error::DecodeError;

/// The 3-bit category selector of an item header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MajorType {
    Unsigned = 0,
    Negative = 1,
    Bytes = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Simple = 7,
}

impl MajorType {
    /// Extracts the major type from a header byte.
    #[inline]
    pub fn from_header(header: u8) -> MajorType {
        match header >> 5 {
            0 => MajorType::Unsigned,
            1 => MajorType::Negative,
            2 => MajorType::Bytes,
            3 => MajorType::Text,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tag,
            _ => MajorType::Simple,
        }
    }

    /// Returns true if this major type may use the indefinite-length form.
    pub fn allows_indefinite(self) -> bool {
        matches!(
            self,
            MajorType::Bytes | MajorType::Text | MajorType::Array | MajorType::Map
        )
    }
}

/// Additional information selecting a 2-byte half float in major type 7.
pub const INFO_F16: u8 = 25;
/// Additional information selecting a 4-byte float in major type 7.
pub const INFO_F32: u8 = 26;
/// Additional information selecting an 8-byte float in major type 7.
pub const INFO_F64: u8 = 27;
/// Additional information marking an indefinite length.
pub const INFO_INDEFINITE: u8 = 31;

/// Extracts the 5-bit additional information from a header byte.
#[inline]
pub fn additional_info(header: u8) -> u8 {
    header & 0x1f
}

/// The decoded argument of a header: a length, count, value or tag number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Definite(u64),
    Indefinite,
}

/// Reads the argument selected by `info`, consuming any out-of-line bytes.
///
/// `offset` is the position of the header byte, used for error reporting.
pub fn read_argument(reader: &mut Reader<'_>, info: u8, offset: usize) -> Result<Argument, DecodeError> {
    let value = match info {
        0..=23 => info as u64,
        24 => reader.read_u8("argument")? as u64,
        25 => reader.read_u16("argument")? as u64,
        26 => reader.read_u32("argument")? as u64,
        27 => reader.read_u64("argument")?,
        INFO_INDEFINITE => return Ok(Argument::Indefinite),
        _ => return Err(DecodeError::InvalidLengthEncoding { info, offset }),
    };
    Ok(Argument::Definite(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argument(bytes: &[u8]) -> Result<Argument, DecodeError> {
        let mut reader = Reader::new(bytes);
        let header = reader.read_u8("header")?;
        read_argument(&mut reader, additional_info(header), 0)
    }

    #[test]
    fn test_major_type_from_header() {
        assert_eq!(MajorType::from_header(0x00), MajorType::Unsigned);
        assert_eq!(MajorType::from_header(0x3b), MajorType::Negative);
        assert_eq!(MajorType::from_header(0x5f), MajorType::Bytes);
        assert_eq!(MajorType::from_header(0x7f), MajorType::Text);
        assert_eq!(MajorType::from_header(0x9f), MajorType::Array);
        assert_eq!(MajorType::from_header(0xbf), MajorType::Map);
        assert_eq!(MajorType::from_header(0xc2), MajorType::Tag);
        assert_eq!(MajorType::from_header(0xff), MajorType::Simple);
    }

    #[test]
    fn test_argument_widths() {
        assert_eq!(argument(&[0x17]).unwrap(), Argument::Definite(23));
        assert_eq!(argument(&[0x18, 0xff]).unwrap(), Argument::Definite(255));
        assert_eq!(argument(&[0x19, 0x03, 0xe8]).unwrap(), Argument::Definite(1000));
        assert_eq!(
            argument(&[0x1a, 0x00, 0x0f, 0x42, 0x40]).unwrap(),
            Argument::Definite(1_000_000)
        );
        assert_eq!(
            argument(&[0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]).unwrap(),
            Argument::Definite(u64::MAX)
        );
        assert_eq!(argument(&[0x5f]).unwrap(), Argument::Indefinite);
    }

    #[test]
    fn test_reserved_info_rejected() {
        for header in [0x1c, 0x1d, 0x1e, 0xfc, 0x5d] {
            assert!(matches!(
                argument(&[header]),
                Err(DecodeError::InvalidLengthEncoding { .. })
            ));
        }
    }

    #[test]
    fn test_truncated_argument() {
        assert!(matches!(
            argument(&[0x19, 0x01]),
            Err(DecodeError::UnexpectedEndOfInput { context: "argument", .. })
        ));
    }

    #[test]
    fn test_allows_indefinite() {
        assert!(!MajorType::Unsigned.allows_indefinite());
        assert!(!MajorType::Tag.allows_indefinite());
        assert!(MajorType::Map.allows_indefinite());
        assert!(MajorType::Text.allows_indefinite());
    }
}
