//! Lookup of the formats a conversion can read from or write to
//!
//! `FormatRegistry::default()` knows `markdown`, `adf` and `treeviz`. The CLI
//! resolves `--from`/`--to` names and file extensions through it.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;
use std::collections::{BTreeMap, HashMap};

/// Formats keyed by name, kept in name order.
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// A registry with no formats.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Adds `format` under its own name, replacing any earlier one.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let name = format.name().to_string();
        tracing::trace!(name, "registering format");
        self.formats.insert(name, Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        match self.formats.get(name) {
            Some(format) => Ok(format.as_ref()),
            None => Err(FormatError::FormatNotFound(name.to_string())),
        }
    }

    /// Registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Name of the first format claiming the extension of `filename`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename).extension()?.to_str()?;
        self.formats
            .iter()
            .find(|(_, format)| format.file_extensions().contains(&extension))
            .map(|(name, _)| name.clone())
    }

    /// Reads `source` as `format`. Fails for write-only formats.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let reader = self.get(format)?;
        if !reader.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "'{format}' cannot be read"
            )));
        }
        reader.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Writes `doc` as `format`, handing `options` to the writer untouched.
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let writer = self.get(format)?;
        if !writer.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "'{format}' cannot be written"
            )));
        }
        writer.serialize_with_options(doc, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::adf::AdfFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);
        registry
    }
}
