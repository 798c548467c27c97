//! Big-endian binary integers (COMP/COMP-4, SEG-Y header words).
//!
//! Mainframe integers are two's complement, most significant byte first.
//! A single trait covers every width so the byte-order logic exists once.

use crate::error::EncodingError;
use crate::Result;

/// Fixed-width integers stored most significant byte first.
pub trait BigEndian: Sized + Copy {
    /// Storage width in bytes.
    const WIDTH: usize;

    /// Read `WIDTH` bytes at `start`; bytes past the field are ignored.
    ///
    /// # Errors
    /// Returns `EncodingError::InvalidArgument` if the field runs past the
    /// end of `bytes`.
    fn read_be(bytes: &[u8], start: usize) -> Result<Self>;

    /// Big-endian bytes of `self`.
    fn to_be_vec(self) -> Vec<u8>;
}

macro_rules! impl_big_endian {
    ($($ty:ty),*) => {
        $(
            impl BigEndian for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn read_be(bytes: &[u8], start: usize) -> Result<Self> {
                    let window = field(bytes, start, Self::WIDTH)?;
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(window);
                    Ok(<$ty>::from_be_bytes(buf))
                }

                fn to_be_vec(self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }
            }
        )*
    };
}

impl_big_endian!(i16, i32, u16, u32);

fn field(bytes: &[u8], start: usize, width: usize) -> Result<&[u8]> {
    start
        .checked_add(width)
        .and_then(|end| bytes.get(start..end))
        .ok_or_else(|| {
            EncodingError::invalid_argument(format!(
                "{}-byte integer at offset {} exceeds buffer length {}",
                width,
                start,
                bytes.len()
            ))
        })
}

/// Decode a big-endian 16-bit signed integer at `start`.
pub fn to_i16(bytes: &[u8], start: usize) -> Result<i16> {
    i16::read_be(bytes, start)
}

/// Decode a big-endian 32-bit signed integer at `start`.
pub fn to_i32(bytes: &[u8], start: usize) -> Result<i32> {
    i32::read_be(bytes, start)
}

/// Encode a 16-bit signed integer as two big-endian bytes.
pub fn i16_bytes(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode a 32-bit signed integer as four big-endian bytes.
pub fn i32_bytes(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}
