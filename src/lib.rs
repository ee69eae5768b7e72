//! # mintscan-koinly - Mintscan export to Koinly universal CSV
//!
//! Converts transaction export CSVs from the Mintscan chain explorer into the
//! Koinly "universal" ledger format consumed by tax and portfolio tools.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Export CSV  │────▶│   Parser    │────▶│  Transform  │────▶│ Koinly CSV  │
//! │ (any enc.)  │     │ (auto-enc)  │     │ (row|group) │     │ (12 cols)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Two independent pipelines share the output schema:
//!
//! - per-row conversion ([`convert_rows`]): unit conversion from the
//!   micro-denomination, lenient timestamp normalization to UTC, type
//!   classification, row-local filtering; output keeps input order
//! - grouped conversion ([`aggregate_rows`]): filter to known types, collapse
//!   IBC send/receive into plain send/receive, group by (txhash, type) and sum
//!   amounts; output sorted by group key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mintscan_koinly::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let summary = convert_file(
//!     Path::new("export.csv"),
//!     Path::new("export_koinly.csv"),
//!     &ConvertOptions::default(),
//! )?;
//! println!("{} transactions", summary.rows_written);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - error types
//! - [`models`] - transaction types, source rows, ledger rows
//! - [`parser`] - CSV parsing with encoding/delimiter auto-detection
//! - [`transform`] - amount/timestamp normalization and the two pipelines

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Flow, Label, LedgerRow, SourceRow, TxType};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_file_auto,
    ParseResult,
};

// =============================================================================
// Re-exports - Pipelines
// =============================================================================

pub use transform::{
    aggregate_rows, convert_rows, ConvertOptions,
};

pub use transform::pipeline::{
    aggregate_file, convert_file, default_output_path, CsvInfo, RunSummary,
};
