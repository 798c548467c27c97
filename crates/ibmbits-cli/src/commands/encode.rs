//! Encode a value to mainframe field bytes.

use std::str::FromStr;

use ibmbits::decimal::{decimal_bytes, f32_to_ibm, i16_bytes, i32_bytes, pack_decimal};
use ibmbits::CodecConfig;
use miette::{IntoDiagnostic, Result, WrapErr};
use rust_decimal::Decimal;

use super::FieldKind;
use crate::output::EncodeOutput;

/// Fixed packed field layout: digits before and after the decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedLayout {
    pub integer_digits: usize,
    pub decimal_digits: usize,
    pub signed: bool,
}

pub fn run(
    kind: FieldKind,
    value: &str,
    layout: Option<PackedLayout>,
    config: &CodecConfig,
) -> Result<EncodeOutput> {
    tracing::debug!(kind = kind.name(), value, ?layout, "encoding");

    let bytes = match kind {
        FieldKind::Text => config.encode_text(value)?,
        FieldKind::I16 => i16_bytes(parse::<i16>(value)?).to_vec(),
        FieldKind::I32 => i32_bytes(parse::<i32>(value)?).to_vec(),
        FieldKind::Float => f32_to_ibm(parse::<f32>(value)?)?.to_vec(),
        FieldKind::Packed => {
            let decimal = parse::<Decimal>(value)?;
            match layout {
                Some(l) => pack_decimal(&decimal, l.integer_digits, l.decimal_digits, l.signed)?,
                None => decimal_bytes(&decimal),
            }
        }
    };

    Ok(EncodeOutput {
        kind: kind.name(),
        value: value.to_string(),
        hex: hex::encode_upper(bytes),
    })
}

fn parse<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .into_diagnostic()
        .wrap_err_with(|| format!("Cannot parse '{}'", value))
}
