//! JSON formatting module
//!
//! Renders conversion results with a configurable indent. Key order follows
//! the field order of the serialized structs.

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};

/// Main JSON formatter
pub struct JsonFormatter {
    config: ConversionConfig,
}

impl JsonFormatter {
    /// Create a new formatter with configuration
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Format any serializable value as JSON text
    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> ConversionResult<String> {
        let mut buffer = Vec::with_capacity(256);
        if self.config.pretty {
            let indent = self.config.indent();
            self.write(&mut buffer, value, PrettyFormatter::with_indent(&indent))?;
        } else {
            self.write(&mut buffer, value, CompactFormatter)?;
        }
        String::from_utf8(buffer).map_err(|e| ConversionError::serialization(e.to_string()))
    }

    fn write<F, T>(&self, buffer: &mut Vec<u8>, value: &T, formatter: F) -> ConversionResult<()>
    where
        F: Formatter,
        T: Serialize + ?Sized,
    {
        if self.config.ensure_ascii {
            let mut serializer = Serializer::with_formatter(buffer, AsciiFormatter(formatter));
            value.serialize(&mut serializer)?;
        } else {
            let mut serializer = Serializer::with_formatter(buffer, formatter);
            value.serialize(&mut serializer)?;
        }
        Ok(())
    }
}

/// Wraps another formatter and escapes non-ASCII characters as `\uXXXX`,
/// using UTF-16 surrogate pairs outside the basic multilingual plane
struct AsciiFormatter<F>(F);

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Format a value with the given configuration
pub fn format_json<T: Serialize + ?Sized>(
    value: &T,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    JsonFormatter::new(config.clone()).format(value)
}
