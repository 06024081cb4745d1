//! UTF-8 to UTF-16 transcoding for text strings.
//!
//! Text payloads are transcoded incrementally, chunk by chunk for indefinite
//! strings, straight into UTF-16 code units. The lead byte decides the
//! sequence width; continuation bytes contribute their low six bits and are
//! not otherwise validated.

use crate::error::DecodeError;

/// Appends the UTF-16 code units of a UTF-8 `chunk` to `out`.
///
/// `base` is the input offset of the first chunk byte, used for error
/// reporting. A sequence whose continuation bytes run past the end of the
/// chunk is reported as [`DecodeError::UnexpectedEndOfInput`].
pub fn transcode_utf8(chunk: &[u8], base: usize, out: &mut Vec<u16>) -> Result<(), DecodeError> {
    out.reserve(chunk.len());

    let mut i = 0;
    while i < chunk.len() {
        let lead = chunk[i] as u32;
        let (scalar, width) = if lead & 0x80 == 0 {
            (lead, 1)
        } else if lead < 0xe0 {
            ((lead & 0x1f) << 6 | continuation(chunk, i + 1, base)?, 2)
        } else if lead < 0xf0 {
            (
                (lead & 0x0f) << 12
                    | continuation(chunk, i + 1, base)? << 6
                    | continuation(chunk, i + 2, base)?,
                3,
            )
        } else {
            (
                (lead & 0x07) << 18
                    | continuation(chunk, i + 1, base)? << 12
                    | continuation(chunk, i + 2, base)? << 6
                    | continuation(chunk, i + 3, base)?,
                4,
            )
        };
        push_scalar(scalar, out);
        i += width;
    }
    Ok(())
}

#[inline]
fn continuation(chunk: &[u8], index: usize, base: usize) -> Result<u32, DecodeError> {
    match chunk.get(index) {
        Some(&byte) => Ok((byte & 0x3f) as u32),
        None => Err(DecodeError::UnexpectedEndOfInput {
            context: "utf-8 sequence",
            offset: base + chunk.len(),
        }),
    }
}

/// Emits one unit below 0x10000, otherwise a surrogate pair.
#[inline]
fn push_scalar(scalar: u32, out: &mut Vec<u16>) {
    if scalar < 0x1_0000 {
        out.push(scalar as u16);
    } else {
        let offset = scalar - 0x1_0000;
        out.push((0xd800 | (offset >> 10)) as u16);
        out.push((0xdc00 | (offset & 0x3ff)) as u16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcode(bytes: &[u8]) -> Vec<u16> {
        let mut out = Vec::new();
        transcode_utf8(bytes, 0, &mut out).unwrap();
        out
    }

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(transcode(b"IETF"), "IETF".encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn test_multibyte_forms() {
        for s in ["\u{fc}", "\u{6c34}", "\u{10151}", "mixed \u{e9}\u{20ac}\u{1f600}!"] {
            assert_eq!(transcode(s.as_bytes()), s.encode_utf16().collect::<Vec<_>>(), "{s}");
        }
    }

    #[test]
    fn test_surrogate_pair_layout() {
        // U+10151 -> 0x0151 above the BMP
        assert_eq!(transcode(&[0xf0, 0x90, 0x85, 0x91]), vec![0xd800, 0xdd51]);
    }

    #[test]
    fn test_appends_across_chunks() {
        let mut out = Vec::new();
        transcode_utf8(b"strea", 0, &mut out).unwrap();
        transcode_utf8(b"ming", 5, &mut out).unwrap();
        assert_eq!(String::from_utf16(&out).unwrap(), "streaming");
    }

    #[test]
    fn test_encoded_surrogate_is_kept_as_unit() {
        // ED A0 80 is the 3-byte form of U+D800; it is carried through as-is.
        assert_eq!(transcode(&[0xed, 0xa0, 0x80]), vec![0xd800]);
    }

    #[test]
    fn test_truncated_sequence() {
        let mut out = Vec::new();
        let result = transcode_utf8(&[0x61, 0xe6, 0xb0], 10, &mut out);
        assert_eq!(
            result,
            Err(DecodeError::UnexpectedEndOfInput {
                context: "utf-8 sequence",
                offset: 13
            })
        );
    }
}
