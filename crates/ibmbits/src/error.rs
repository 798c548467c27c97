//! Error types for mainframe data conversion.

use thiserror::Error;

/// Errors raised by the codecs, the stream adapter and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum EncodingError {
    /// An argument places the requested window outside the buffer, or is
    /// otherwise unusable (bad scale, non-finite float).
    #[error("invalid argument: {message}")]
    #[diagnostic(code(ibmbits::invalid_argument))]
    InvalidArgument { message: String },

    /// The stream ended before a fixed-width field was complete.
    #[error("insufficient data: needed {needed} bytes, {available} available")]
    #[diagnostic(
        code(ibmbits::insufficient_data),
        help("the record is shorter than its layout; check the field lengths")
    )]
    InsufficientData { needed: usize, available: usize },

    /// A packed decimal nibble outside its valid range.
    #[error("undefined encoding: {message}")]
    #[diagnostic(code(ibmbits::undefined_encoding))]
    UndefinedEncoding { message: String },

    /// A character with no mapping in the target code page.
    #[error("character {ch:?} cannot be encoded in {code_page}")]
    #[diagnostic(
        code(ibmbits::unrepresentable),
        help("use substitute fallback or a code page that contains this character")
    )]
    Unrepresentable { ch: char, code_page: &'static str },

    /// Unknown code page name or CCSID.
    #[error("unknown code page: {0}")]
    #[diagnostic(code(ibmbits::invalid_code_page))]
    InvalidCodePage(String),

    /// Underlying reader or writer failure.
    #[error("I/O error: {0}")]
    #[diagnostic(code(ibmbits::io))]
    Io(String),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    #[diagnostic(code(ibmbits::config))]
    Config(String),
}

impl EncodingError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        EncodingError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn undefined_encoding(message: impl Into<String>) -> Self {
        EncodingError::UndefinedEncoding {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for EncodingError {
    fn from(err: std::io::Error) -> Self {
        EncodingError::Io(err.to_string())
    }
}
