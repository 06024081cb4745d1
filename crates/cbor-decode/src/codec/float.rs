//! Half-precision (16-bit) float unpacking.

/// Smallest positive subnormal half (2^-24).
const F16_SUBNORMAL_UNIT: f32 = 1.0 / 16_777_216.0;

/// Decodes the raw bits of an IEEE 754-2008 half-precision float.
///
/// Normal values, infinities and NaNs are widened by rebuilding the
/// single-precision bit pattern (exponent rebiased from 15 to 127, fraction
/// shifted into the top of the 23-bit field). Subnormals have no
/// single-precision bit-pattern shortcut and are scaled directly.
pub fn decode_f16(bits: u16) -> f32 {
    let bits = bits as u32;
    let sign = bits & 0x8000;
    let mut exponent = bits & 0x7c00;
    let fraction = bits & 0x03ff;

    if exponent == 0x7c00 {
        exponent = 0xff << 10;
    } else if exponent != 0 {
        exponent += (127 - 15) << 10;
    } else if fraction != 0 {
        let magnitude = fraction as f32 * F16_SUBNORMAL_UNIT;
        return if sign != 0 { -magnitude } else { magnitude };
    }

    f32::from_bits((sign << 16) | (exponent << 13) | (fraction << 13))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_f16_zero() {
        assert_eq!(decode_f16(0x0000).to_bits(), 0.0f32.to_bits());
        assert_eq!(decode_f16(0x8000).to_bits(), (-0.0f32).to_bits());
    }

    #[test]
    fn test_decode_f16_normal() {
        assert_eq!(decode_f16(0x3c00), 1.0);
        assert_eq!(decode_f16(0xbc00), -1.0);
        assert_eq!(decode_f16(0x3e00), 1.5);
        assert_eq!(decode_f16(0x4000), 2.0);
        assert_eq!(decode_f16(0xc400), -4.0);
        assert_eq!(decode_f16(0x7bff), 65504.0);
        assert_eq!(decode_f16(0x0400), 0.000_061_035_156_25);
    }

    #[test]
    fn test_decode_f16_subnormal() {
        assert_eq!(decode_f16(0x0001) as f64, 2f64.powi(-24));
        assert_eq!(decode_f16(0x8001) as f64, -(2f64.powi(-24)));
        assert_eq!(decode_f16(0x03ff) as f64, 1023.0 * 2f64.powi(-24));
    }

    #[test]
    fn test_decode_f16_infinity() {
        assert_eq!(decode_f16(0x7c00), f32::INFINITY);
        assert_eq!(decode_f16(0xfc00), f32::NEG_INFINITY);
    }

    #[test]
    fn test_decode_f16_nan() {
        assert!(decode_f16(0x7e00).is_nan());
        assert!(decode_f16(0x7c01).is_nan());
        assert!(decode_f16(0xfc01).is_nan());
    }
}
