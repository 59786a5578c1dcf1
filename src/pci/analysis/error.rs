use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the different failure cases that can occur while the
/// tool reads spreadsheet exports, derives reports, or writes them out.
///
/// Every variant aborts the report being generated. Non-fatal conditions such
/// as an empty filter window are reported through
/// [`ReportWarning`](crate::window::ReportWarning) instead.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when CSV serialisation fails.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the spreadsheet reader implementation.
    #[error("spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::Error),

    /// Raised when the layered configuration cannot be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Raised when an expected marker row or column is not where the layout
    /// says it should be.
    #[error("unexpected spreadsheet layout: {0}")]
    Structural(String),

    /// Raised when a date cell cannot be interpreted.
    #[error("cannot parse {column} '{value}' on row {row}: {reason}")]
    Parse {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    /// Raised when a daycare visit line appears before any date header.
    #[error("daycare visit '{line}' on row {row} appears before any date header")]
    UndatedVisit { row: usize, line: String },

    /// Raised when the caller passes a parameter that cannot be honoured.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ReportError {
    pub(crate) fn parse(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReportError::Parse {
            row,
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
