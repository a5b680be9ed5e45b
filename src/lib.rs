//! Text/HTML to JSON converter
//!
//! Classifies pasted input as HTML (at least one element found by a lenient
//! parser) or plain text, and renders one of two fixed JSON shapes.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod shell;

// Re-export commonly used types
pub use conversion::{
    convert, generate, to_json, ConversionConfig, ConversionOutput, HtmlConversionResult,
    InputKind, JsonDocument, TextConversionResult,
};
pub use error::{ConfigError, ConversionError};
pub use formatter::JsonFormatter;
pub use parser::{parse_html, Document};
pub use shell::Session;

/// Convert input to JSON text with default configuration
pub fn convert_to_json(raw: &str) -> Result<String, ConversionError> {
    let config = ConversionConfig::default();
    convert_to_json_with_config(raw, &config)
}

/// Convert input to JSON text with custom configuration
pub fn convert_to_json_with_config(
    raw: &str,
    config: &ConversionConfig,
) -> Result<String, ConversionError> {
    let result = generate(raw, config)?;
    Ok(result.json)
}
