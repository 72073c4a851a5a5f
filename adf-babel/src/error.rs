//! Error types for format operations
//!
//! The markdown converter itself never fails; these errors come from format
//! lookup, the wire JSON codec and option handling.

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation or option
    NotSupported(String),
    /// A media placeholder still waits for upload (carries its source)
    PendingMedia(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::PendingMedia(source) => {
                write!(f, "Media '{source}' has not been uploaded yet")
            }
        }
    }
}

impl std::error::Error for FormatError {}
