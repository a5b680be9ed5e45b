//! Text/HTML to JSON conversion module
//!
//! This module contains the classification and conversion logic and its configuration.

pub mod config;
pub mod engine;

pub use config::ConversionConfig;

pub use engine::{
    convert, generate, to_json, ConversionEngine, ConversionMetadata, ConversionOutput,
    HtmlConversionResult, InputKind, JsonDocument, TextConversionResult,
};

pub use crate::error::ConversionResult;
