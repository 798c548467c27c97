//! Codec configuration: code page selection and decode/encode policies.
//!
//! ```toml
//! code_page = "CP037"
//! text_fallback = "substitute"
//! sign_policy = "strict"
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{unpack_decimal_with, Sign, SignPolicy};
use crate::ebcdic::{CodePage, CodePageRegistry, TextFallback};
use crate::error::EncodingError;
use crate::Result;

/// Settings shared by every conversion a program performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Code page name or CCSID (e.g. "CP037", "IBM-1047", "500").
    #[serde(default = "default_code_page")]
    pub code_page: String,
    /// Handling of characters missing from the code page.
    #[serde(default)]
    pub text_fallback: TextFallback,
    /// Handling of non-preferred packed decimal sign nibbles.
    #[serde(default)]
    pub sign_policy: SignPolicy,
}

fn default_code_page() -> String {
    "CP037".to_string()
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            code_page: default_code_page(),
            text_fallback: TextFallback::default(),
            sign_policy: SignPolicy::default(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EncodingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate the code page.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| EncodingError::Config(e.to_string()))?;
        config.code_page()?;
        tracing::debug!(
            code_page = %config.code_page,
            fallback = ?config.text_fallback,
            sign_policy = ?config.sign_policy,
            "loaded codec configuration"
        );
        Ok(config)
    }

    /// Resolve the configured code page.
    pub fn code_page(&self) -> Result<&'static CodePage> {
        CodePageRegistry::by_name(&self.code_page)
    }

    /// Decode EBCDIC text with the configured code page.
    pub fn decode_text(&self, bytes: &[u8]) -> Result<String> {
        self.code_page()?.decode(bytes)
    }

    /// Encode text with the configured code page and fallback.
    pub fn encode_text(&self, s: &str) -> Result<Vec<u8>> {
        self.code_page()?.encode_with(s, self.text_fallback)
    }

    /// Decode a packed decimal under the configured sign policy.
    pub fn unpack_decimal(&self, bytes: &[u8], scale: u32) -> Result<(Decimal, Sign)> {
        unpack_decimal_with(bytes, scale, self.sign_policy)
    }
}
