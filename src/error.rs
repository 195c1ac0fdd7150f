//! Error types for docoutline.

use std::io;
use thiserror::Error;

/// Result type alias for docoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the (infallible) structure-inference pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading inputs or writing results.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF could not be loaded or decoded.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Serializing a result or reading a heuristics file failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Heuristics overrides are unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The layout extractor produced nothing usable, such as a PDF without pages.
    #[error("Layout extraction error: {0}")]
    Extraction(String),
}
