//! Stream adapters over `std::io::Read` and `std::io::Write`.
//!
//! The codecs only see complete, exactly-sized buffers. These traits read
//! the right number of bytes first and report a short read as
//! [`EncodingError::InsufficientData`] without invoking the codec.

use std::io::{ErrorKind, Read, Write};

use rust_decimal::Decimal;

use crate::decimal::{decimal_bytes, f32_to_ibm, ibm_to_f32, to_decimal, BigEndian};
use crate::ebcdic::CodePage;
use crate::error::EncodingError;
use crate::Result;

/// Fill as much of `buf` as the reader provides; returns the byte count.
fn read_up_to<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

fn read_field<R: Read + ?Sized>(reader: &mut R, count: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; count];
    let available = read_up_to(reader, &mut buf)?;
    if available < count {
        tracing::debug!(needed = count, available, "short read");
        return Err(EncodingError::InsufficientData {
            needed: count,
            available,
        });
    }
    Ok(buf)
}

/// Mainframe field readers for any byte source.
pub trait ReadIbmExt: Read {
    /// Read up to `count` EBCDIC characters.
    ///
    /// The string is shorter than `count` if the stream ends first.
    fn read_ebcdic(&mut self, code_page: &CodePage, count: usize) -> Result<String> {
        let mut buf = vec![0u8; count];
        let available = read_up_to(self, &mut buf)?;
        code_page.decode(&buf[..available])
    }

    /// Read a big-endian integer of any supported width.
    fn read_be<T: BigEndian>(&mut self) -> Result<T> {
        let bytes = read_field(self, T::WIDTH)?;
        T::read_be(&bytes, 0)
    }

    fn read_i16_be(&mut self) -> Result<i16> {
        self.read_be()
    }

    fn read_i32_be(&mut self) -> Result<i32> {
        self.read_be()
    }

    /// Read a 4-byte IBM single precision float.
    fn read_ibm_f32(&mut self) -> Result<f32> {
        let bytes = read_field(self, 4)?;
        ibm_to_f32(&bytes)
    }

    /// Read a packed decimal occupying `storage_len` bytes.
    fn read_packed_decimal(&mut self, storage_len: usize, scale: u32) -> Result<Decimal> {
        let bytes = read_field(self, storage_len)?;
        to_decimal(&bytes, scale)
    }
}

impl<R: Read + ?Sized> ReadIbmExt for R {}

/// Mainframe field writers for any byte sink.
pub trait WriteIbmExt: Write {
    /// Write `value` as EBCDIC, substituting unmappable characters.
    fn write_ebcdic(&mut self, code_page: &CodePage, value: &str) -> Result<()> {
        let bytes = code_page.encode(value)?;
        self.write_all(&bytes)?;
        Ok(())
    }

    fn write_be<T: BigEndian>(&mut self, value: T) -> Result<()> {
        self.write_all(&value.to_be_vec())?;
        Ok(())
    }

    fn write_i16_be(&mut self, value: i16) -> Result<()> {
        self.write_be(value)
    }

    fn write_i32_be(&mut self, value: i32) -> Result<()> {
        self.write_be(value)
    }

    fn write_ibm_f32(&mut self, value: f32) -> Result<()> {
        self.write_all(&f32_to_ibm(value)?)?;
        Ok(())
    }

    /// Write `value` as a minimum-width packed decimal.
    fn write_packed_decimal(&mut self, value: &Decimal) -> Result<()> {
        self.write_all(&decimal_bytes(value))?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteIbmExt for W {}
