//! Error types for pdfscript library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfscript operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, building, or rendering a transcript.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The fragment payload is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The fragment source could not reach or parse the document.
    #[error("{0}")]
    Source(String),

    /// A fragment record was rejected in strict mode.
    #[error("Invalid fragment: {0}")]
    InvalidFragment(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range string.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
