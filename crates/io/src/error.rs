//! Error types for hydrofill-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the hydrofill-io crate.
///
/// Covers missing inputs, malformed CSV rows, Parquet failures, schema
/// validation problems, and errors bubbled up from the data model.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem failure.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when a CSV row cannot be interpreted.
    #[error("{}:{line}: {reason}", path.display())]
    MalformedRow {
        /// File containing the row.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// Returned when a required column is absent from a file header.
    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        column: String,
        /// File that was inspected.
        path: PathBuf,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an error originating from the hydrofill-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from the hydrofill-gapfill crate.
    #[error("data model error: {reason}")]
    Model {
        /// Description of the underlying failure.
        reason: String,
    },
}

impl IoError {
    pub(crate) fn io(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        IoError::Io {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<hydrofill_calendar::CalendarError> for IoError {
    fn from(e: hydrofill_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<hydrofill_gapfill::GapFillError> for IoError {
    fn from(e: hydrofill_gapfill::GapFillError) -> Self {
        IoError::Model {
            reason: e.to_string(),
        }
    }
}
