use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid menu export: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} could not be opened as CSV: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// A single source row that failed type coercion. Captured alongside the
/// successfully parsed rows so one bad row never discards a whole export.
#[derive(Debug, Clone)]
pub struct RowFailure {
    pub line: u64,
    pub message: String,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
