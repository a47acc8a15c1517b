//! Error types for the fars crate.

use polars::prelude::PolarsError;
use thiserror::Error;

/// The main error type for fars operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// The yearly data file is not present in the data directory.
    #[error("file '{filename}' does not exist")]
    MissingFile {
        /// File name as resolved from the year.
        filename: String,
    },

    /// The requested state code has no records in the loaded year.
    #[error("invalid STATE number: {state}")]
    InvalidState {
        /// Coerced state code, `NA` when coercion failed.
        state: String,
    },

    // === Data Errors ===
    /// Parsing or transforming a table failed.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Rendering Errors ===
    /// The plotting backend failed to draw or write the map.
    #[error("failed to render map: {0}")]
    Render(String),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for fars operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Check if this error means the year's file was absent.
    #[must_use]
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::MissingFile { .. })
    }

    /// Check if this error is a rejected state code.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}
