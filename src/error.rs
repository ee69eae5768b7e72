//! Error types for the conversion pipelines.
//!
//! Two levels, converted automatically via `From` so `?` works across
//! boundaries:
//!
//! - [`CsvError`] - source CSV reading/decoding errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Everything below this level degrades instead of failing: malformed amounts
//! become `0`, unparseable timestamps become empty dates, unknown transaction
//! types are filtered out. Only an unreadable source or an unwritable output
//! aborts a run.

use thiserror::Error;

// =============================================================================
// CSV Source Errors
// =============================================================================

/// Errors while reading and decoding a source CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the source file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file content.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Invalid CSV structure.
    #[error("Invalid CSV format: {0}")]
    Parse(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::convert_file`]
/// and [`crate::transform::pipeline::aggregate_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Failed to write the output file.
    #[error("Failed to write output: {0}")]
    Write(#[from] csv::Error),

    /// IO error outside of CSV parsing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown IANA timezone name in the configuration.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV source operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
