//! EBCDIC text transcoding.
//!
//! Each EBCDIC byte is one character. Decoding is total: every byte of every
//! supported code page maps to a character. Encoding substitutes the
//! EBCDIC question mark for characters missing from the page unless the
//! strict variant is used.
//!
//! # Supported Code Pages
//!
//! - **CP037** (US/Canada, the default for SEG-Y and most COBOL data)
//! - **CP500** (International)
//! - **CP1047** (Open Systems Latin-1)
//! - **CP1140** (CP037 with the Euro sign)
//!
//! Use [`CodePageRegistry`] or [`CodePage::from_ccsid`] for runtime lookup.

mod registry;
mod tables;

pub use registry::CodePageRegistry;
pub use tables::{CodePage, CP037, CP1047, CP1140, CP500};

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;
use crate::Result;

/// What to do with characters that have no mapping in the code page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFallback {
    /// Replace with the code page's `?`.
    #[default]
    Substitute,
    /// Fail with [`EncodingError::Unrepresentable`].
    Strict,
}

/// Validate that `[offset, offset + length)` lies inside `0..total`.
fn check_window(offset: usize, length: usize, total: usize, what: &str) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= total => Ok(()),
        _ => Err(EncodingError::invalid_argument(format!(
            "{} window {}..{}+{} exceeds length {}",
            what, offset, offset, length, total
        ))),
    }
}

impl CodePage {
    /// Decode EBCDIC bytes to a string.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.decode_range(bytes, 0, bytes.len())
    }

    /// Decode from `offset` to the end of the buffer.
    ///
    /// # Errors
    /// Returns `EncodingError::InvalidArgument` if `offset` is past the end.
    pub fn decode_from(&self, bytes: &[u8], offset: usize) -> Result<String> {
        let length = bytes.len().checked_sub(offset).ok_or_else(|| {
            EncodingError::invalid_argument(format!(
                "offset {} exceeds buffer length {}",
                offset,
                bytes.len()
            ))
        })?;
        self.decode_range(bytes, offset, length)
    }

    /// Decode `length` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns `EncodingError::InvalidArgument` if the window runs past the
    /// end of `bytes`.
    pub fn decode_range(&self, bytes: &[u8], offset: usize, length: usize) -> Result<String> {
        check_window(offset, length, bytes.len(), "byte")?;
        Ok(bytes[offset..offset + length]
            .iter()
            .map(|&b| self.ebcdic_to_char(b))
            .collect())
    }

    /// Encode a string, substituting `?` for unmappable characters.
    pub fn encode(&self, s: &str) -> Result<Vec<u8>> {
        self.encode_with(s, TextFallback::Substitute)
    }

    /// Encode a string, failing on the first unmappable character.
    ///
    /// # Errors
    /// Returns `EncodingError::Unrepresentable` naming the character.
    pub fn encode_strict(&self, s: &str) -> Result<Vec<u8>> {
        self.encode_with(s, TextFallback::Strict)
    }

    /// Encode the characters of `s` from `offset` to the end.
    pub fn encode_from(&self, s: &str, offset: usize) -> Result<Vec<u8>> {
        let count = s.chars().count();
        let length = count.checked_sub(offset).ok_or_else(|| {
            EncodingError::invalid_argument(format!(
                "offset {} exceeds string length {}",
                offset, count
            ))
        })?;
        self.encode_range(s, offset, length)
    }

    /// Encode `length` characters of `s` starting at character `offset`.
    pub fn encode_range(&self, s: &str, offset: usize, length: usize) -> Result<Vec<u8>> {
        check_window(offset, length, s.chars().count(), "character")?;
        let window: String = s.chars().skip(offset).take(length).collect();
        self.encode(&window)
    }

    /// Encode with an explicit fallback policy.
    pub fn encode_with(&self, s: &str, fallback: TextFallback) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(s.len());
        for ch in s.chars() {
            match self.char_to_ebcdic(ch) {
                Some(b) => result.push(b),
                None if fallback == TextFallback::Substitute => {
                    tracing::trace!(code_page = self.name, ?ch, "substituting unmappable character");
                    result.push(self.substitute_byte());
                }
                None => {
                    return Err(EncodingError::Unrepresentable {
                        ch,
                        code_page: self.name,
                    })
                }
            }
        }
        Ok(result)
    }

    /// Convert a single EBCDIC byte to its Unicode character.
    pub fn ebcdic_to_char(&self, ebcdic: u8) -> char {
        if let Some(&(_, ch)) = self.special_chars.iter().find(|&&(eb, _)| eb == ebcdic) {
            ch
        } else {
            char::from(self.ebcdic_to_ascii[ebcdic as usize])
        }
    }

    /// Convert a character to its EBCDIC byte, if the page contains it.
    pub fn char_to_ebcdic(&self, ch: char) -> Option<u8> {
        if let Some(&(eb, _)) = self.special_chars.iter().find(|&&(_, c)| c == ch) {
            return Some(eb);
        }
        let latin1 = u8::try_from(u32::from(ch)).ok()?;
        let eb = self.ascii_to_ebcdic[latin1 as usize];
        // A special character displaced this Latin-1 code point.
        if self.special_chars.iter().any(|&(b, _)| b == eb) {
            return None;
        }
        Some(eb)
    }

    /// The byte written for unmappable characters (`?`).
    #[inline]
    pub fn substitute_byte(&self) -> u8 {
        self.ascii_to_ebcdic[b'?' as usize]
    }

    /// Look up a code page by CCSID number.
    ///
    /// # Errors
    /// Returns `EncodingError::InvalidCodePage` if the CCSID is not recognized.
    pub fn from_ccsid(ccsid: u16) -> Result<&'static CodePage> {
        CodePageRegistry::from_ccsid(ccsid)
    }

    /// Look up a code page by name (e.g., "CP037", "IBM-1047").
    pub fn by_name(name: &str) -> Result<&'static CodePage> {
        CodePageRegistry::by_name(name)
    }
}
