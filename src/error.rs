// src/error.rs

//! Error type shared by every stage of pattern generation.

use thiserror::Error;

/// Failures raised while generating, quantizing or rendering a pattern.
///
/// Every variant is reported at the point of detection; nothing is retried
/// and no partial pattern is produced for the failing row.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("{shape} needs at least {min} rows, got {rows}")]
    InvalidRowCount {
        shape: &'static str,
        rows: u32,
        min: u32,
    },
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Quantization margin must be at least 1")]
    InvalidMargin,
    #[error("Rows must have at least one stitch (previous: {prev:?}, current: {count})")]
    InvalidStitchCount { prev: Option<u32>, count: u32 },
    #[error(
        "Cannot go from {prev} to {count} stitches with single increases or decreases \
         (a row can at most double or halve)"
    )]
    UnreachableTransition { prev: u32, count: u32 },
    #[error("Repeat count must be at least 1")]
    InvalidRepeatCount,
    #[error("Failed to read phrasebook: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse phrasebook: {0}")]
    Phrasebook(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PatternError>;
