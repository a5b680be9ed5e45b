//! Presentation shell state
//!
//! A headless controller for the two text regions, the status line and the
//! generate/clear actions. Front ends own rendering; this module owns the
//! rules for what each action does to the buffers.

pub mod intro;

use std::fmt;

use tracing::{debug, warn};

use crate::conversion::{ConversionConfig, ConversionEngine};
use crate::error::ConversionError;

pub use intro::{Frame, IntroAnimation};

/// Label shown above the input region
pub const INPUT_LABEL: &str = "/jso [html or text to convert to JSON]";

/// Label shown above the output region
pub const OUTPUT_LABEL: &str = "JSON Output:";

/// Single-line status indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Generated,
    Cleared,
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::Generated => write!(f, "JSON generated successfully"),
            Status::Cleared => write!(f, "Cleared input and output"),
            Status::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// A blocking error notification for the front end to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    fn error(body: String) -> Self {
        Self {
            title: "Error".to_string(),
            body,
        }
    }
}

impl From<&ConversionError> for Notification {
    fn from(error: &ConversionError) -> Self {
        Notification::error(error.user_message())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

/// Input buffer, read-only output buffer and status line
pub struct Session {
    engine: ConversionEngine,
    input: String,
    output: String,
    status: Status,
}

impl Session {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            engine: ConversionEngine::new(config),
            input: String::new(),
            output: String::new(),
            status: Status::Ready,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Append one line to the input region
    pub fn push_input(&mut self, line: &str) {
        if !self.input.is_empty() {
            self.input.push('\n');
        }
        self.input.push_str(line);
    }

    /// Convert the current input. On failure the output region keeps its
    /// previous content and the returned notification should be shown.
    pub fn generate(&mut self) -> Result<(), Notification> {
        match self.engine.generate(&self.input) {
            Ok(output) => {
                debug!(kind = %output.metadata.kind, "session output updated");
                self.output = output.json;
                self.status = Status::Generated;
                Ok(())
            }
            Err(error) => {
                warn!(%error, "generation failed");
                self.status = Status::Error(error.to_string());
                Err(Notification::from(&error))
            }
        }
    }

    /// Empty both regions
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.status = Status::Cleared;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}
