//! Error types for the Zeo log converter.

use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading an export or writing log lines.
#[derive(Debug, Error)]
pub enum Error {
    /// A date/time field did not match `M/D/Y H:MM` or has no valid instant in the zone
    #[error("Parse error in field '{field}' (value '{value}'): {message}")]
    Parse {
        field: String,
        value: String,
        message: String,
    },

    /// A field the conversion depends on is absent or empty
    #[error("Parse error: required field '{field}' is missing or empty")]
    MissingField { field: String },

    /// A code in the packed sleep graph is outside the known state table
    #[error("Unknown sleep state code '{0}'")]
    UnknownState(String),

    /// The timezone name is not in the timezone database
    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tabular input could not be decoded (ragged rows, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn parse(field: &str, value: &str, message: impl Into<String>) -> Self {
        Error::Parse {
            field: field.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        Error::MissingField {
            field: field.to_string(),
        }
    }

    /// True for both malformed and missing date fields.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::MissingField { .. })
    }
}
