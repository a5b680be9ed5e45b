//! Error types and handling infrastructure for text/HTML to JSON conversion

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Input was empty or whitespace-only; raised before any parsing
    #[error("No input provided")]
    EmptyInput,

    #[error("JSON serialization error: {message}")]
    Serialization { message: String },
}

impl ConversionError {
    pub fn serialization(message: String) -> Self {
        Self::Serialization { message }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Please enter some text or HTML to convert to JSON".to_string(),
            Self::Serialization { .. } => format!("Failed to generate JSON: {}", self),
        }
    }

    /// Process exit status used by the CLI for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::EmptyInput => 2,
            Self::Serialization { .. } => 1,
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Indent size must be 0-8 spaces (got {0})")]
    IndentSize(u8),
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
