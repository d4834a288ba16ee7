//! Typed failures raised at the input boundary and by the schema builder.
//!
//! Command handlers wrap these in `anyhow` with extra context; callers can
//! still recover the variant with `downcast_ref`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Unsupported input format for {path:?}; expected .csv, .tsv, .txt or .json")]
    UnsupportedFormat { path: PathBuf },
    #[error("Line {line} must contain exactly two comma-separated fields: '{raw}'")]
    MalformedRecord { line: usize, raw: String },
    #[error("Column name list has {names} line(s) but sample value list has {samples}")]
    LengthMismatch { names: usize, samples: usize },
    #[error("Both column names and sample values are required")]
    EmptyInput,
    #[error("Line {line} has an empty column label")]
    BlankLabel { line: usize },
    #[error("Input must have at least 2 columns (label, sample); found {found}")]
    TooFewColumns { found: usize },
    #[error("JSON entry {index} is invalid: {reason}")]
    InvalidJson { index: usize, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error(
        "Columns '{first}' and '{second}' both normalize to identifier '{identifier}'"
    )]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },
}
