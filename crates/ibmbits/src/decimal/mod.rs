//! Numeric field codecs.
//!
//! - **Binary (COMP/COMP-4)**: big-endian two's complement integers
//! - **IBM floating point (COMP-1)**: System/360 base-16 single precision
//! - **Packed Decimal (COMP-3)**: BCD digits with a trailing sign nibble

pub mod binary;
pub mod floating;
pub mod packed;

pub use binary::{i16_bytes, i32_bytes, to_i16, to_i32, BigEndian};
pub use floating::{f32_to_ibm, ibm_to_f32, IbmFloat};
pub use packed::{
    decimal_bytes, pack_decimal, to_decimal, unpack_decimal, unpack_decimal_with, PackedDecimal,
};

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// Result type for numeric field operations.
pub type Result<T> = std::result::Result<T, EncodingError>;

/// Sign of a decoded packed decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Sign nibble 0xC (or 0xA/0xE under the lenient policy).
    Positive,
    /// Sign nibble 0xD (or 0xB under the lenient policy).
    Negative,
    /// Sign nibble 0xF.
    Unsigned,
}

/// How strictly packed decimal sign nibbles are checked on decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignPolicy {
    /// Only 0xC, 0xD and 0xF are accepted.
    #[default]
    Strict,
    /// IBM alternates are accepted; any other nibble reads as positive.
    Lenient,
}

impl Sign {
    /// The preferred sign nibble: 0xC positive, 0xD negative, 0xF unsigned.
    pub fn to_packed_nibble(self) -> u8 {
        match self {
            Sign::Positive => 0x0C,
            Sign::Negative => 0x0D,
            Sign::Unsigned => 0x0F,
        }
    }

    /// Parse a packed decimal sign nibble under the given policy.
    ///
    /// # Errors
    /// Returns `EncodingError::UndefinedEncoding` for nibbles the policy
    /// does not accept.
    pub fn from_packed_nibble(nibble: u8, policy: SignPolicy) -> Result<Self> {
        let nibble = nibble & 0x0F;
        match (nibble, policy) {
            (0x0C, _) => Ok(Sign::Positive),
            (0x0D, _) => Ok(Sign::Negative),
            (0x0F, _) => Ok(Sign::Unsigned),
            (0x0B, SignPolicy::Lenient) => Ok(Sign::Negative),
            (_, SignPolicy::Lenient) => {
                tracing::debug!(nibble, "non-preferred sign nibble read as positive");
                Ok(Sign::Positive)
            }
            (_, SignPolicy::Strict) => Err(EncodingError::undefined_encoding(format!(
                "invalid sign nibble: 0x{:X}",
                nibble
            ))),
        }
    }

    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_to_packed_nibble() {
        assert_eq!(Sign::Positive.to_packed_nibble(), 0x0C);
        assert_eq!(Sign::Negative.to_packed_nibble(), 0x0D);
        assert_eq!(Sign::Unsigned.to_packed_nibble(), 0x0F);
    }

    #[test]
    fn test_sign_from_packed_nibble_strict() {
        let strict = SignPolicy::Strict;
        assert_eq!(Sign::from_packed_nibble(0x0C, strict).unwrap(), Sign::Positive);
        assert_eq!(Sign::from_packed_nibble(0x0D, strict).unwrap(), Sign::Negative);
        assert_eq!(Sign::from_packed_nibble(0x0F, strict).unwrap(), Sign::Unsigned);
        for nibble in [0x00, 0x05, 0x09, 0x0A, 0x0B, 0x0E] {
            assert!(matches!(
                Sign::from_packed_nibble(nibble, strict),
                Err(EncodingError::UndefinedEncoding { .. })
            ));
        }
    }

    #[test]
    fn test_sign_from_packed_nibble_lenient() {
        let lenient = SignPolicy::Lenient;
        assert_eq!(Sign::from_packed_nibble(0x0A, lenient).unwrap(), Sign::Positive);
        assert_eq!(Sign::from_packed_nibble(0x0E, lenient).unwrap(), Sign::Positive);
        assert_eq!(Sign::from_packed_nibble(0x0B, lenient).unwrap(), Sign::Negative);
        assert_eq!(Sign::from_packed_nibble(0x03, lenient).unwrap(), Sign::Positive);
    }

    #[test]
    fn test_sign_policy_default_is_strict() {
        assert_eq!(SignPolicy::default(), SignPolicy::Strict);
    }
}
