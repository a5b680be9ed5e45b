//! Configuration options for JSON rendering

use crate::error::ConfigError;

/// Largest accepted indentation width
pub const MAX_INDENT_SIZE: u8 = 8;

/// Conversion configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Spaces per indentation level (0-8)
    pub indent_size: u8,
    /// Pretty-print output (vs compact)
    pub pretty: bool,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ensure_ascii: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            indent_size: 2,
            pretty: true,
            ensure_ascii: false,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output for piping into other tools
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }

    /// Set indentation size
    pub fn with_indent_size(mut self, size: u8) -> Result<Self, ConfigError> {
        if size > MAX_INDENT_SIZE {
            return Err(ConfigError::IndentSize(size));
        }
        self.indent_size = size;
        Ok(self)
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable/disable ASCII-only string escaping
    pub fn with_ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_size > MAX_INDENT_SIZE {
            return Err(ConfigError::IndentSize(self.indent_size));
        }
        Ok(())
    }

    /// Indentation unit used by the pretty printer
    pub fn indent(&self) -> Vec<u8> {
        vec![b' '; usize::from(self.indent_size)]
    }
}
