//! Packed Decimal (COMP-3) encoding and decoding.
//!
//! Packed decimal format stores two decimal digits per byte, with the
//! rightmost nibble containing the sign. The scale (digits right of the
//! implied decimal point) is not stored; the caller supplies it from the
//! record layout.
//!
//! # Format
//!
//! - Each pair of digits occupies one byte, most significant first
//! - The sign nibble is in the rightmost position: 0xC positive,
//!   0xD negative, 0xF unsigned
//! - Storage size = ceil((digits + 1) / 2) bytes
//!
//! Example: +12345
//! - Layout: d1|d2 d3|d4 d5|sign
//! - Binary: 0x12 0x34 0x5C (3 bytes)
//!
//! Example: +123456
//! - Layout: 0|d1 d2|d3 d4|d5 d6|sign (leading zero pad for even digits)
//! - Binary: 0x01 0x23 0x45 0x6C (4 bytes)

use rust_decimal::{Decimal, RoundingStrategy};

use super::{Result, Sign, SignPolicy};
use crate::error::EncodingError;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Fixed-layout packed decimal field, as declared by `PIC S9(i)V9(d) COMP-3`.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedDecimal {
    /// The decimal value
    pub value: Decimal,
    /// Number of integer digits (before decimal point)
    pub integer_digits: usize,
    /// Number of fractional digits (after decimal point)
    pub decimal_digits: usize,
    /// Whether the field is signed
    pub signed: bool,
}

impl PackedDecimal {
    pub fn new(value: Decimal, integer_digits: usize, decimal_digits: usize, signed: bool) -> Self {
        Self {
            value,
            integer_digits,
            decimal_digits,
            signed,
        }
    }

    /// Storage size in bytes: ceil((total_digits + 1) / 2).
    pub fn storage_size(&self) -> usize {
        (self.integer_digits + self.decimal_digits + 2) / 2
    }

    /// Encode the value to packed decimal bytes of exactly `storage_size()`.
    pub fn encode(&self) -> Result<Vec<u8>> {
        pack_decimal(
            &self.value,
            self.integer_digits,
            self.decimal_digits,
            self.signed,
        )
    }

    /// Decode packed decimal bytes using this field layout.
    pub fn decode(bytes: &[u8], integer_digits: usize, decimal_digits: usize) -> Result<Self> {
        let (value, sign) = unpack_decimal(bytes, scale_from(decimal_digits)?)?;
        Ok(Self {
            value,
            integer_digits,
            decimal_digits,
            signed: sign != Sign::Unsigned,
        })
    }
}

fn scale_from(decimal_digits: usize) -> Result<u32> {
    u32::try_from(decimal_digits)
        .ok()
        .filter(|&scale| scale <= MAX_SCALE)
        .ok_or_else(|| {
            EncodingError::invalid_argument(format!(
                "scale {} exceeds maximum of {}",
                decimal_digits, MAX_SCALE
            ))
        })
}

/// Pack digit values (0-9, most significant first) and a sign nibble.
///
/// An even digit count gets a leading zero nibble so the sign lands in the
/// low nibble of the last byte.
fn pack_nibbles(digits: &[u8], sign: Sign) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(digits.len() + 2);
    if digits.len() % 2 == 0 {
        nibbles.push(0);
    }
    nibbles.extend_from_slice(digits);
    nibbles.push(sign.to_packed_nibble());

    nibbles
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect()
}

fn digits_of(magnitude: u128) -> Vec<u8> {
    magnitude.to_string().bytes().map(|b| b - b'0').collect()
}

/// Encode a decimal as packed decimal with the minimum number of bytes.
///
/// The decimal point is dropped: the digits of the value's own scale are
/// packed, and the reader must supply the same scale. Negative values get
/// sign nibble 0xD, everything else 0xC. Zero packs to `[0x0C]`.
pub fn decimal_bytes(value: &Decimal) -> Vec<u8> {
    let mantissa = value.mantissa();
    let sign = if mantissa < 0 {
        Sign::Negative
    } else {
        Sign::Positive
    };
    pack_nibbles(&digits_of(mantissa.unsigned_abs()), sign)
}

/// Encode a decimal into a fixed-width packed field.
///
/// The value is truncated to `decimal_digits` fractional digits and
/// left-padded with zeros to `integer_digits + decimal_digits` digits.
/// Unsigned fields use sign nibble 0xF.
///
/// # Errors
/// Returns `EncodingError::InvalidArgument` if the value needs more digits
/// than the field provides, or if the scaled value exceeds the 28
/// significant digits of a `Decimal`.
pub fn pack_decimal(
    value: &Decimal,
    integer_digits: usize,
    decimal_digits: usize,
    signed: bool,
) -> Result<Vec<u8>> {
    let total_digits = integer_digits + decimal_digits;
    let scale = scale_from(decimal_digits)?;

    let mut scaled = value
        .abs()
        .round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    scaled.rescale(scale);
    if scaled.scale() != scale {
        return Err(EncodingError::invalid_argument(format!(
            "value {} cannot carry {} fractional digits within 28 significant digits",
            value, scale
        )));
    }

    let sign = match (signed, value.is_sign_negative() && !scaled.is_zero()) {
        (false, _) => Sign::Unsigned,
        (true, true) => Sign::Negative,
        (true, false) => Sign::Positive,
    };

    let mut digits = digits_of(scaled.mantissa().unsigned_abs());
    if scaled.is_zero() {
        digits.clear();
    }
    if digits.len() > total_digits {
        return Err(EncodingError::invalid_argument(format!(
            "value {} requires {} digits but only {} available",
            value,
            digits.len(),
            total_digits
        )));
    }

    let mut padded = vec![0u8; total_digits - digits.len()];
    padded.extend_from_slice(&digits);
    Ok(pack_nibbles(&padded, sign))
}

/// Decode packed decimal bytes, rejecting non-preferred sign nibbles.
///
/// `scale` digits lie to the right of the decimal point.
pub fn unpack_decimal(bytes: &[u8], scale: u32) -> Result<(Decimal, Sign)> {
    unpack_decimal_with(bytes, scale, SignPolicy::Strict)
}

/// Decode packed decimal bytes to a value, discarding the sign flavor.
pub fn to_decimal(bytes: &[u8], scale: u32) -> Result<Decimal> {
    unpack_decimal(bytes, scale).map(|(value, _)| value)
}

/// Decode packed decimal bytes under an explicit sign policy.
///
/// A scale at or above the digit count pads with leading zeros: `[0x1C]`
/// at scale 2 is `0.01`, never the integer `1`.
///
/// # Errors
/// - `InvalidArgument` for an empty buffer, a scale above 28, or more
///   significant digits than a `Decimal` holds.
/// - `UndefinedEncoding` for a digit nibble above 9 or a sign nibble the
///   policy rejects.
pub fn unpack_decimal_with(
    bytes: &[u8],
    scale: u32,
    policy: SignPolicy,
) -> Result<(Decimal, Sign)> {
    let (&last, leading) = bytes
        .split_last()
        .ok_or_else(|| EncodingError::invalid_argument("empty packed decimal"))?;
    if scale > MAX_SCALE {
        return Err(EncodingError::invalid_argument(format!(
            "scale {} exceeds maximum of {}",
            scale, MAX_SCALE
        )));
    }

    let nibbles = leading
        .iter()
        .flat_map(|&byte| [byte >> 4, byte & 0x0F])
        .chain(std::iter::once(last >> 4));

    let mut mantissa: i128 = 0;
    for (position, digit) in nibbles.enumerate() {
        if digit > 9 {
            return Err(EncodingError::undefined_encoding(format!(
                "invalid digit nibble 0x{:X} at position {}",
                digit, position
            )));
        }
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(i128::from(digit)))
            .ok_or_else(|| too_many_digits(bytes.len()))?;
    }

    let sign = Sign::from_packed_nibble(last, policy)?;

    let mut value = Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|_| too_many_digits(bytes.len()))?;
    if sign.is_negative() {
        value = -value;
    }

    Ok((value, sign))
}

fn too_many_digits(len: usize) -> EncodingError {
    EncodingError::invalid_argument(format!(
        "{}-byte packed decimal exceeds 28 significant digits",
        len
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_unpack_positive() {
        let (value, sign) = unpack_decimal(&[0x12, 0x34, 0x5C], 0).unwrap();
        assert_eq!(value, Decimal::from(12345));
        assert_eq!(sign, Sign::Positive);
    }

    #[test]
    fn test_unpack_negative() {
        let (value, sign) = unpack_decimal(&[0x12, 0x34, 0x5D], 0).unwrap();
        assert_eq!(value, Decimal::from(-12345));
        assert_eq!(sign, Sign::Negative);
    }

    #[test]
    fn test_unpack_unsigned() {
        let (value, sign) = unpack_decimal(&[0x12, 0x34, 0x5F], 0).unwrap();
        assert_eq!(value, Decimal::from(12345));
        assert_eq!(sign, Sign::Unsigned);
    }

    #[test]
    fn test_unpack_with_scale() {
        assert_eq!(to_decimal(&[0x12, 0x34, 0x5C], 2).unwrap(), dec("123.45"));
        assert_eq!(to_decimal(&[0x12, 0x34, 0x5D], 5).unwrap(), dec("-0.12345"));
    }

    #[test]
    fn test_unpack_scale_wider_than_digits() {
        assert_eq!(to_decimal(&[0x1C], 2).unwrap(), dec("0.01"));
        assert_eq!(to_decimal(&[0x01, 0x2D], 3).unwrap(), dec("-0.012"));
    }

    #[test]
    fn test_unpack_even_digits() {
        let (value, _) = unpack_decimal(&[0x01, 0x23, 0x45, 0x6C], 0).unwrap();
        assert_eq!(value, Decimal::from(123456));
    }

    #[test]
    fn test_zero_signs_distinguished() {
        let (plus, plus_sign) = unpack_decimal(&[0x00, 0x0C], 0).unwrap();
        let (minus, minus_sign) = unpack_decimal(&[0x00, 0x0D], 0).unwrap();
        let (unsigned, unsigned_sign) = unpack_decimal(&[0x00, 0x0F], 0).unwrap();
        assert!(plus.is_zero() && minus.is_zero() && unsigned.is_zero());
        assert_eq!(plus_sign, Sign::Positive);
        assert_eq!(minus_sign, Sign::Negative);
        assert_eq!(unsigned_sign, Sign::Unsigned);
    }

    #[test]
    fn test_unpack_empty() {
        assert!(matches!(
            unpack_decimal(&[], 0),
            Err(EncodingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_unpack_invalid_digit() {
        assert!(matches!(
            unpack_decimal(&[0x1A, 0x2C], 0),
            Err(EncodingError::UndefinedEncoding { .. })
        ));
        assert!(matches!(
            unpack_decimal(&[0xF2, 0x3C], 0),
            Err(EncodingError::UndefinedEncoding { .. })
        ));
        // High nibble of the sign byte is still a digit.
        assert!(unpack_decimal(&[0xBC], 0).is_err());
    }

    #[test]
    fn test_unpack_invalid_sign() {
        assert!(matches!(
            unpack_decimal(&[0x12, 0x35], 0),
            Err(EncodingError::UndefinedEncoding { .. })
        ));
        assert!(unpack_decimal(&[0x12, 0x3A], 0).is_err());
        let (value, sign) = unpack_decimal_with(&[0x12, 0x3B], 0, SignPolicy::Lenient).unwrap();
        assert_eq!(value, Decimal::from(-123));
        assert_eq!(sign, Sign::Negative);
    }

    #[test]
    fn test_unpack_scale_too_large() {
        assert!(matches!(
            unpack_decimal(&[0x1C], 29),
            Err(EncodingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_unpack_too_many_digits() {
        // 31 nines
        let mut bytes = vec![0x99; 15];
        bytes.push(0x9C);
        assert!(matches!(
            unpack_decimal(&bytes, 0),
            Err(EncodingError::InvalidArgument { .. })
        ));
        // 28 nines fit
        let mut bytes = vec![0x09];
        bytes.extend(vec![0x99; 13]);
        bytes.push(0x9C);
        assert_eq!(
            to_decimal(&bytes, 0).unwrap(),
            dec("9999999999999999999999999999")
        );
    }

    #[test]
    fn test_decimal_bytes_positive() {
        assert_eq!(decimal_bytes(&Decimal::from(12345)), vec![0x12, 0x34, 0x5C]);
    }

    #[test]
    fn test_decimal_bytes_negative() {
        assert_eq!(decimal_bytes(&Decimal::from(-12345)), vec![0x12, 0x34, 0x5D]);
    }

    #[test]
    fn test_decimal_bytes_even_digits() {
        assert_eq!(
            decimal_bytes(&Decimal::from(123456)),
            vec![0x01, 0x23, 0x45, 0x6C]
        );
        assert_eq!(decimal_bytes(&Decimal::from(12)), vec![0x01, 0x2C]);
    }

    #[test]
    fn test_decimal_bytes_drops_point() {
        assert_eq!(decimal_bytes(&dec("123.45")), vec![0x12, 0x34, 0x5C]);
        assert_eq!(decimal_bytes(&dec("-1.50")), vec![0x15, 0x0D]);
    }

    #[test]
    fn test_decimal_bytes_zero() {
        assert_eq!(decimal_bytes(&Decimal::ZERO), vec![0x0C]);
        assert_eq!(decimal_bytes(&dec("0.00")), vec![0x0C]);
    }

    #[test]
    fn test_zero_roundtrip_with_scale() {
        let bytes = decimal_bytes(&Decimal::ZERO);
        assert_eq!(to_decimal(&bytes, 2).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_roundtrip_with_scale() {
        for (text, scale) in [("123.45", 2), ("-9876.54", 2), ("9876543210.12", 2), ("7", 0)] {
            let original = dec(text);
            let bytes = decimal_bytes(&original);
            assert_eq!(to_decimal(&bytes, scale).unwrap(), original, "{}", text);
        }
    }

    #[test]
    fn test_pack_fixed_width() {
        assert_eq!(
            pack_decimal(&Decimal::from(12345), 5, 0, true).unwrap(),
            vec![0x12, 0x34, 0x5C]
        );
        assert_eq!(
            pack_decimal(&dec("123.45"), 3, 2, true).unwrap(),
            vec![0x12, 0x34, 0x5C]
        );
        assert_eq!(
            pack_decimal(&Decimal::from(42), 6, 0, true).unwrap(),
            vec![0x00, 0x00, 0x04, 0x2C]
        );
    }

    #[test]
    fn test_pack_fixed_width_rescales() {
        // 1.5 in PIC S9(3)V99 is stored as 00150
        assert_eq!(
            pack_decimal(&dec("1.5"), 3, 2, true).unwrap(),
            vec![0x00, 0x15, 0x0C]
        );
        // Extra fractional digits are truncated.
        assert_eq!(
            pack_decimal(&dec("-1.239"), 3, 2, true).unwrap(),
            vec![0x00, 0x12, 0x3D]
        );
    }

    #[test]
    fn test_pack_unsigned() {
        assert_eq!(
            pack_decimal(&Decimal::from(-5), 1, 0, false).unwrap(),
            vec![0x5F]
        );
    }

    #[test]
    fn test_pack_overflow() {
        assert!(matches!(
            pack_decimal(&Decimal::from(123456), 5, 0, true),
            Err(EncodingError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_pack_zero() {
        assert_eq!(
            pack_decimal(&Decimal::ZERO, 3, 0, true).unwrap(),
            vec![0x00, 0x0C]
        );
        assert_eq!(
            pack_decimal(&dec("-0.001"), 3, 2, true).unwrap(),
            vec![0x00, 0x00, 0x0C]
        );
    }

    #[test]
    fn test_packed_decimal_struct() {
        let pd = PackedDecimal::new(dec("9876.54"), 4, 2, true);
        assert_eq!(pd.storage_size(), 4);
        let encoded = pd.encode().unwrap();
        assert_eq!(encoded.len(), pd.storage_size());
        let decoded = PackedDecimal::decode(&encoded, 4, 2).unwrap();
        assert_eq!(decoded.value, pd.value);
        assert!(decoded.signed);
    }

    #[test]
    fn test_pack_wide_field_scale_overflow() {
        // 10^27 at scale 2 needs a 30-digit mantissa.
        let value = dec("1000000000000000000000000000");
        assert!(matches!(
            pack_decimal(&value, 28, 2, true),
            Err(EncodingError::InvalidArgument { .. })
        ));

        let fits = dec("10000000000000000000000000");
        let bytes = pack_decimal(&fits, 28, 2, true).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(to_decimal(&bytes, 2).unwrap(), fits);
    }
}
