//! IBM mainframe data encodings for host programs.
//!
//! This crate converts between mainframe field formats and native Rust
//! values, for readers and writers of SEG-Y traces, COBOL copybook records
//! and similar mainframe-originated files.
//!
//! # Features
//!
//! - **EBCDIC Conversion**: CP037, CP500, CP1047 and CP1140 text
//! - **Binary Integer**: big-endian 16/32-bit integers
//! - **IBM Floating Point**: System/360 single precision ↔ `f32`
//! - **Packed Decimal**: COMP-3 ↔ `rust_decimal::Decimal`
//! - **Streams**: `Read`/`Write` extensions for all of the above
//!
//! # Example
//!
//! ```rust
//! use ibmbits::ebcdic::CP037;
//! use ibmbits::decimal::{decimal_bytes, f32_to_ibm, ibm_to_f32, to_decimal, to_i16};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! // EBCDIC conversion
//! let text = CP037.decode(&[0xC8, 0x85, 0x93, 0x93, 0x96, 0x6B]).unwrap();
//! assert_eq!(text, "Hello,");
//!
//! // Big-endian integers
//! assert_eq!(to_i16(&[0x00, 0x02], 0).unwrap(), 2);
//!
//! // IBM floating point
//! assert_eq!(f32_to_ibm(1.0).unwrap(), [0x41, 0x10, 0x00, 0x00]);
//! assert_eq!(ibm_to_f32(&[0x41, 0x10, 0x00, 0x00]).unwrap(), 1.0);
//!
//! // Packed decimal
//! let value = Decimal::from_str("123.45").unwrap();
//! let packed = decimal_bytes(&value);
//! assert_eq!(packed, vec![0x12, 0x34, 0x5C]);
//! assert_eq!(to_decimal(&packed, 2).unwrap(), value);
//! ```

pub mod config;
pub mod decimal;
pub mod ebcdic;
pub mod error;
pub mod io;

// Re-export commonly used types at crate root
pub use config::CodecConfig;
pub use decimal::{
    decimal_bytes, f32_to_ibm, i16_bytes, i32_bytes, ibm_to_f32, pack_decimal, to_decimal, to_i16,
    to_i32, unpack_decimal, unpack_decimal_with, BigEndian, IbmFloat, PackedDecimal, Sign,
    SignPolicy,
};
pub use ebcdic::{CodePage, CodePageRegistry, TextFallback, CP037, CP1047, CP1140, CP500};
pub use error::EncodingError;
pub use io::{ReadIbmExt, WriteIbmExt};

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;
