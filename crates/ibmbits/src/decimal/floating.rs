//! IBM System/360 Hexadecimal Floating Point (HFP), single precision.
//!
//! Used by COBOL COMP-1 items and by SEG-Y trace samples (format code 1).
//!
//! # Layout
//!
//! ```text
//! [S|EEEEEEE|FFFFFFFFFFFFFFFFFFFFFFFF]
//!  1    7              24 bits
//! ```
//!
//! - **S**: sign bit (sign-magnitude, no two's complement)
//! - **E**: base-16 exponent with bias 64
//! - **F**: unsigned fraction, value = F / 2^24, no implicit leading bit
//!
//! Value = (-1)^S * (F / 2^24) * 16^(E - 64)
//!
//! HFP has no NaN or Infinity; the fraction is truncated, not rounded, when
//! encoding, so a round trip is accurate to about 24 bits.

use super::Result;
use crate::error::EncodingError;

const EXPONENT_BIAS: i32 = 64;
const IBM_BASE: f64 = 16.0;
/// 2^24: divides the 3-byte fraction down to [0, 1).
const THREE_BYTE_SHIFT: f64 = 16_777_216.0;

/// A COMP-1 value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IbmFloat {
    value: f32,
}

impl IbmFloat {
    /// Create a new IBM float from an `f32`.
    ///
    /// Returns an error for NaN and Infinity, which HFP cannot represent.
    pub fn new(value: f32) -> Result<Self> {
        check_finite(value)?;
        Ok(Self { value })
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Encode to 4-byte HFP.
    pub fn encode(&self) -> [u8; 4] {
        encode_finite(self.value)
    }

    /// Decode from the first 4 bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            value: ibm_to_f32(bytes)?,
        })
    }
}

impl From<IbmFloat> for f32 {
    fn from(ibm: IbmFloat) -> f32 {
        ibm.value
    }
}

impl From<IbmFloat> for f64 {
    fn from(ibm: IbmFloat) -> f64 {
        f64::from(ibm.value)
    }
}

fn check_finite(value: f32) -> Result<()> {
    if value.is_nan() {
        return Err(EncodingError::invalid_argument(
            "NaN has no IBM floating point representation",
        ));
    }
    if value.is_infinite() {
        return Err(EncodingError::invalid_argument(
            "Infinity has no IBM floating point representation",
        ));
    }
    Ok(())
}

/// Decode IBM single precision from the first 4 bytes of `bytes`.
///
/// Bytes past the first four are ignored.
///
/// # Errors
/// Returns `EncodingError::InvalidArgument` if fewer than 4 bytes are given.
pub fn ibm_to_f32(bytes: &[u8]) -> Result<f32> {
    let word: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            EncodingError::invalid_argument(format!(
                "IBM float requires 4 bytes, got {}",
                bytes.len()
            ))
        })?;
    Ok(decode_word(word))
}

fn decode_word(word: [u8; 4]) -> f32 {
    if word == [0; 4] {
        return 0.0;
    }

    let sign = if word[0] & 0x80 != 0 { -1.0 } else { 1.0 };
    let exponent = IBM_BASE.powi(i32::from(word[0] & 0x7F) - EXPONENT_BIAS);
    let mantissa = u32::from_be_bytes([0, word[1], word[2], word[3]]);
    let fraction = f64::from(mantissa) / THREE_BYTE_SHIFT;

    (sign * exponent * fraction) as f32
}

/// Encode an `f32` as 4-byte IBM single precision.
///
/// # Errors
/// Returns `EncodingError::InvalidArgument` for NaN and Infinity.
pub fn f32_to_ibm(value: f32) -> Result<[u8; 4]> {
    check_finite(value)?;
    Ok(encode_finite(value))
}

fn encode_finite(value: f32) -> [u8; 4] {
    if value == 0.0 {
        return [0; 4];
    }

    let magnitude = f64::from(value.abs());

    // Hex digits to move the radix point so the fraction drops below 1.
    // log2 / 4 is exact for powers of two, where ln / ln(16) is not.
    let mut move_radix = (magnitude.log2() / 4.0).floor() as i32 + 1;
    let mut fraction = magnitude / IBM_BASE.powi(move_radix);
    if fraction >= 1.0 {
        move_radix += 1;
        fraction /= IBM_BASE;
    } else if fraction < 1.0 / IBM_BASE {
        move_radix -= 1;
        fraction *= IBM_BASE;
    }

    let fraction_bits = ((fraction * THREE_BYTE_SHIFT) as u32) & 0x00FF_FFFF;
    let [_, f1, f2, f3] = fraction_bits.to_be_bytes();

    // Every finite f32 lands in 27..=96, well inside 7 bits.
    let exponent = (move_radix + EXPONENT_BIAS) as u8;
    let sign = if value < 0.0 { 0x80 } else { 0x00 };

    [sign + exponent, f1, f2, f3]
}
