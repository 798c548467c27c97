//! Structured output for machine-readable CLI responses.
//!
//! When `--format json` is specified, commands emit these types as JSON
//! instead of human-readable text.

use ibmbits::Sign;
use serde::Serialize;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// Result of decoding one field.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeOutput {
    pub kind: &'static str,
    pub input: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<Sign>,
}

/// Result of encoding one value.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeOutput {
    pub kind: &'static str,
    pub value: String,
    pub hex: String,
}

/// One supported code page.
#[derive(Debug, Clone, Serialize)]
pub struct CodePageOutput {
    pub name: &'static str,
    pub ccsid: u16,
}

/// Print a serializable value as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}
