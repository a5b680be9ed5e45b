//! Core conversion engine for text/HTML to JSON transformation

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::formatter::JsonFormatter;
use crate::parser::{parse_html, Document};

/// Result shape for input that contains markup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlConversionResult {
    pub html: String,
    pub text: String,
    pub tags: Vec<String>,
    pub links: Vec<String>,
}

/// Result shape for input without any recognisable tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextConversionResult {
    pub input: String,
    pub length: usize,
    pub words: Vec<String>,
    pub lines: Vec<String>,
}

/// One conversion result; serialized without a wrapper, the key set tells
/// the shapes apart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonDocument {
    Html(HtmlConversionResult),
    Text(TextConversionResult),
}

impl JsonDocument {
    pub fn kind(&self) -> InputKind {
        match self {
            JsonDocument::Html(_) => InputKind::Html,
            JsonDocument::Text(_) => InputKind::Text,
        }
    }

    pub fn as_html(&self) -> Option<&HtmlConversionResult> {
        match self {
            JsonDocument::Html(result) => Some(result),
            JsonDocument::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextConversionResult> {
        match self {
            JsonDocument::Text(result) => Some(result),
            JsonDocument::Html(_) => None,
        }
    }
}

/// How an input was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Html,
    Text,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Html => write!(f, "html"),
            InputKind::Text => write!(f, "text"),
        }
    }
}

/// Serialized JSON together with the document it came from
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub json: String,
    pub document: JsonDocument,
    pub metadata: ConversionMetadata,
}

/// Metadata about the conversion process
#[derive(Debug, Clone)]
pub struct ConversionMetadata {
    pub kind: InputKind,
    /// Characters in the trimmed input
    pub input_chars: usize,
    pub element_count: usize,
    pub output_size: u64,
    pub processing_time_ms: u64,
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Classify `raw` and build the matching result shape
    pub fn convert(&self, raw: &str) -> ConversionResult<JsonDocument> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let dom = parse_html(input);
        let document = if dom.has_elements() {
            JsonDocument::Html(build_html_result(&dom))
        } else {
            JsonDocument::Text(build_text_result(input))
        };
        debug!(kind = %document.kind(), input_chars = input.chars().count(), "classified input");
        Ok(document)
    }

    /// Render a document as JSON text
    pub fn render(&self, document: &JsonDocument) -> ConversionResult<String> {
        JsonFormatter::new(self.config.clone()).format(document)
    }

    /// Convert and render in one step, collecting metadata
    pub fn generate(&self, raw: &str) -> ConversionResult<ConversionOutput> {
        let start_time = Instant::now();

        let document = self.convert(raw)?;
        let json = self.render(&document)?;

        let element_count = document.as_html().map_or(0, |html| html.tags.len());
        let metadata = ConversionMetadata {
            kind: document.kind(),
            input_chars: raw.trim().chars().count(),
            element_count,
            output_size: json.len() as u64,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };
        debug!(
            output_size = metadata.output_size,
            elements = metadata.element_count,
            "generated JSON"
        );

        Ok(ConversionOutput {
            json,
            document,
            metadata,
        })
    }
}

fn build_html_result(dom: &Document) -> HtmlConversionResult {
    let tags = dom.elements().map(|element| element.name.clone()).collect();
    let links = dom
        .elements()
        .filter(|element| element.name == "a")
        .filter_map(|element| element.attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string)
        .collect();

    HtmlConversionResult {
        html: dom.to_html(),
        text: dom.text(),
        tags,
        links,
    }
}

fn build_text_result(input: &str) -> TextConversionResult {
    TextConversionResult {
        input: input.to_string(),
        length: input.chars().count(),
        words: input.split_whitespace().map(str::to_string).collect(),
        lines: input.split('\n').map(str::to_string).collect(),
    }
}

/// High-level conversion functions
/// Classify and convert with default configuration
pub fn convert(raw: &str) -> ConversionResult<JsonDocument> {
    ConversionEngine::new(ConversionConfig::default()).convert(raw)
}

/// Render a document as JSON text
pub fn to_json(document: &JsonDocument, config: &ConversionConfig) -> ConversionResult<String> {
    ConversionEngine::new(config.clone()).render(document)
}

/// Convert and render in one step
pub fn generate(raw: &str, config: &ConversionConfig) -> ConversionResult<ConversionOutput> {
    ConversionEngine::new(config.clone()).generate(raw)
}
