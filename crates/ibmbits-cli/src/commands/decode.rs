//! Decode hex-encoded field bytes to a value.

use ibmbits::decimal::{ibm_to_f32, to_i16, to_i32};
use ibmbits::{CodecConfig, EncodingError};
use miette::{IntoDiagnostic, Result, WrapErr};

use super::FieldKind;
use crate::output::DecodeOutput;

/// Part of the input buffer to decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Window {
    pub offset: usize,
    pub length: Option<usize>,
}

impl Window {
    fn slice<'a>(&self, bytes: &'a [u8]) -> std::result::Result<&'a [u8], EncodingError> {
        let end = match self.length {
            Some(length) => self.offset.checked_add(length),
            None => Some(bytes.len()),
        };
        end.and_then(|end| bytes.get(self.offset..end))
            .ok_or_else(|| EncodingError::InvalidArgument {
                message: format!(
                    "window at offset {} exceeds {} input bytes",
                    self.offset,
                    bytes.len()
                ),
            })
    }
}

/// Parse hex input, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let compact: String = input.split_whitespace().collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(digits)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid hex input: {}", input))
}

pub fn run(
    kind: FieldKind,
    input: &str,
    window: Window,
    scale: u32,
    config: &CodecConfig,
) -> Result<DecodeOutput> {
    let bytes = parse_hex(input)?;
    tracing::debug!(kind = kind.name(), len = bytes.len(), ?window, "decoding");

    let field = window.slice(&bytes)?;
    let mut sign = None;
    let value = match kind {
        FieldKind::Text => config.decode_text(field)?,
        FieldKind::I16 => to_i16(field, 0)?.to_string(),
        FieldKind::I32 => to_i32(field, 0)?.to_string(),
        FieldKind::Float => ibm_to_f32(field)?.to_string(),
        FieldKind::Packed => {
            let (value, packed_sign) = config.unpack_decimal(field, scale)?;
            sign = Some(packed_sign);
            value.to_string()
        }
    };

    Ok(DecodeOutput {
        kind: kind.name(),
        input: hex::encode_upper(field),
        value,
        sign,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibmbits::{Sign, SignPolicy};

    fn decode(kind: FieldKind, input: &str) -> Result<DecodeOutput> {
        run(kind, input, Window::default(), 0, &CodecConfig::default())
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0xC8 85").unwrap(), vec![0xC8, 0x85]);
        assert_eq!(parse_hex("c885").unwrap(), vec![0xC8, 0x85]);
        assert!(parse_hex("C8 8").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_decode_text() {
        let out = decode(FieldKind::Text, "C8 85 93 93 96 6B").unwrap();
        assert_eq!(out.value, "Hello,");
        assert_eq!(out.input, "C8859393966B");
    }

    #[test]
    fn test_decode_text_window() {
        let window = Window {
            offset: 4,
            length: Some(4),
        };
        let out = run(
            FieldKind::Text,
            "C8 96 C8 96 C8 96 93 85 5A",
            window,
            0,
            &CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(out.value, "Hole");
    }

    #[test]
    fn test_decode_integers() {
        assert_eq!(decode(FieldKind::I16, "0002").unwrap().value, "2");
        assert_eq!(decode(FieldKind::I32, "89ABCDEF").unwrap().value, "-1985229329");
    }

    #[test]
    fn test_decode_integer_with_offset() {
        let window = Window {
            offset: 2,
            length: None,
        };
        let out = run(FieldKind::I16, "6363 0200 63", window, 0, &CodecConfig::default()).unwrap();
        assert_eq!(out.value, "512");
    }

    #[test]
    fn test_decode_float() {
        assert_eq!(decode(FieldKind::Float, "41100000").unwrap().value, "1");
        assert_eq!(decode(FieldKind::Float, "C276A000").unwrap().value, "-118.625");
    }

    #[test]
    fn test_decode_packed() {
        let out = run(
            FieldKind::Packed,
            "12345D",
            Window::default(),
            2,
            &CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(out.value, "-123.45");
        assert_eq!(out.sign, Some(Sign::Negative));
    }

    #[test]
    fn test_decode_packed_sign_policy() {
        assert!(decode(FieldKind::Packed, "123A").is_err());
        let lenient = CodecConfig {
            sign_policy: SignPolicy::Lenient,
            ..CodecConfig::default()
        };
        let out = run(FieldKind::Packed, "123A", Window::default(), 0, &lenient).unwrap();
        assert_eq!(out.value, "123");
    }

    #[test]
    fn test_decode_window_out_of_range() {
        let window = Window {
            offset: 3,
            length: Some(2),
        };
        assert!(run(FieldKind::Text, "C8C5", window, 0, &CodecConfig::default()).is_err());
    }
}
