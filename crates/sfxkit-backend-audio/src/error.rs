//! Error types for the synthesis backend.

use sfxkit_spec::FormatError;
use thiserror::Error;

/// Result type for synthesis operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while building or rendering a sound.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The parameter data could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A synthesis option is out of range.
    #[error("invalid option '{name}': {message}")]
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid option error.
    pub fn invalid_option(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            message: message.into(),
        }
    }

    /// Returns a short stable code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::Format(err) => err.code(),
            AudioError::InvalidOption { .. } => "A001",
            AudioError::Io(_) => "A002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let err = AudioError::invalid_option("max_samples", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid option 'max_samples': must be positive"
        );
        assert_eq!(err.code(), "A001");
    }

    #[test]
    fn test_format_error_passes_through() {
        let err: AudioError = FormatError::InvalidUtf8.into();
        assert_eq!(err.to_string(), FormatError::InvalidUtf8.to_string());
        assert_eq!(err.code(), FormatError::InvalidUtf8.code());
    }
}
