//! Subcommand implementations.

pub mod codepages;
pub mod decode;
pub mod encode;

use clap::ValueEnum;

/// Mainframe field kinds the CLI understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    /// EBCDIC text
    Text,
    /// Big-endian 16-bit integer
    I16,
    /// Big-endian 32-bit integer
    I32,
    /// IBM System/360 single precision float
    Float,
    /// Packed decimal (COMP-3)
    Packed,
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::I16 => "i16",
            FieldKind::I32 => "i32",
            FieldKind::Float => "float",
            FieldKind::Packed => "packed",
        }
    }
}
