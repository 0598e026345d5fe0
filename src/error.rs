// src/error.rs

use arrow::error::ArrowError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while applying per-year column mappings.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// A loaded year has no entry in the mapping table.
    #[error("Column mapping for year {year} not found")]
    MissingColumnMapping { year: String },

    /// Arrow rejected the relabelled batches.
    #[error("relabelling columns for year {year}: {source}")]
    Relabel {
        year: String,
        #[source]
        source: ArrowError,
    },
}

/// Failures while reading or validating a survey layout.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported layout format {0:?}; expected .yaml, .yml or .json")]
    UnsupportedFormat(PathBuf),

    #[error("survey year {year} is listed more than once")]
    DuplicateSource { year: String },

    #[error("mapping for year {year} uses raw column {raw:?} more than once")]
    DuplicateRawColumn { year: String, raw: String },

    #[error("unknown canonical column {0:?}")]
    UnknownCanonicalColumn(String),

    #[error("reading layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing YAML layout: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("parsing JSON layout: {0}")]
    Json(#[from] serde_json::Error),
}
