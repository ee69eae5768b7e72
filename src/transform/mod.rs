//! Conversion module.
//!
//! - Amount: micro-denomination parsing and decimal formatting
//! - Timestamp: normalization to the fixed UTC output format
//! - Normalizer: per-row converter (input order preserved)
//! - Aggregator: grouped converter (sorted by txhash and type)
//! - Pipeline: file-to-file orchestration

pub mod aggregator;
pub mod amount;
pub mod normalizer;
pub mod pipeline;
pub mod timestamp;

pub use aggregator::aggregate_rows;
pub use normalizer::{convert_rows, ConvertOptions};
pub use pipeline::*;
