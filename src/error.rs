//! Error types for the PTL-X simulator
//!
//! Library code returns [`PtlxError`]; the binary wraps it in `anyhow` with
//! file-path context.

use thiserror::Error;

/// Errors produced by the transform, sampler, config loader and exporters
#[derive(Error, Debug)]
pub enum PtlxError {
    #[error("Shape mismatch: M has {m} elements, E has {e}, R has {r}")]
    ShapeMismatch { m: usize, e: usize, r: usize },

    #[error("Label count mismatch: expected {expected} labels, got {actual}")]
    LabelMismatch { expected: usize, actual: usize },

    #[error("Invalid range for {field}: low={low}, high={high}")]
    InvalidRange {
        field: String,
        low: f64,
        high: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate profile name: '{0}'")]
    DuplicateProfile(String),

    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },

    #[error("Plot rendering failed: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, PtlxError>;
