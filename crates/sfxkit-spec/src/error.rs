//! Error types for parameter parsing and serialization.

use thiserror::Error;

/// Result type for parameter set operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors raised while reading or writing a parameter set.
///
/// All parse failures are terminal for that attempt: no partially populated
/// [`ParameterSet`](crate::ParameterSet) is ever returned.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Binary version tag is not 100, 101 or 102.
    #[error("unsupported sfxr file version '{version}'")]
    UnsupportedVersion {
        /// The version found in the stream.
        version: i32,
    },

    /// Text input has fewer fields than the layout requires.
    #[error("expected {expected} comma-separated fields, found {found}")]
    MissingFields {
        /// Required field count.
        expected: usize,
        /// Field count actually present.
        found: usize,
    },

    /// A text field is not a real number.
    #[error("field {index} ({name}) is not a number: '{value}'")]
    InvalidNumber {
        /// Zero-based field index.
        index: usize,
        /// Field name.
        name: &'static str,
        /// The offending text.
        value: String,
    },

    /// A field parsed to NaN or infinity.
    #[error("field '{name}' is not finite")]
    NonFinite {
        /// Field name.
        name: &'static str,
    },

    /// Binary stream ended before the layout was complete.
    #[error("unexpected end of data while reading '{field}'")]
    UnexpectedEof {
        /// Field that could not be read.
        field: &'static str,
    },

    /// Text stream was not valid UTF-8.
    #[error("parameter text is not valid UTF-8")]
    InvalidUtf8,

    /// Preset name did not match any built-in preset.
    #[error("unknown preset '{name}'")]
    UnknownPreset {
        /// The requested name.
        name: String,
    },

    /// JSON preset error.
    #[error("invalid JSON preset: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Returns a stable error code (e.g., "F001").
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::UnsupportedVersion { .. } => "F001",
            FormatError::MissingFields { .. } => "F002",
            FormatError::InvalidNumber { .. } => "F003",
            FormatError::NonFinite { .. } => "F004",
            FormatError::UnexpectedEof { .. } => "F005",
            FormatError::InvalidUtf8 => "F006",
            FormatError::UnknownPreset { .. } => "F007",
            FormatError::Json(_) => "F008",
            FormatError::Io(_) => "F009",
        }
    }
}
