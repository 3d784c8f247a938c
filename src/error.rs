//! Error types
//!
//! Errors only travel inside a stage. Extraction strategies and provider calls
//! return these, and the stage that owns them turns them into an empty result
//! plus a log line. Nothing here is fatal to a batch run except `AgentError`,
//! which the binary uses for startup problems.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of the generative backend, or its absence
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key configured for the selected provider
    #[error("{0} API key missing")]
    MissingCredentials(&'static str),

    /// Transport-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(String),

    /// Backend answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Backend answered but produced no usable text
    #[error("empty response")]
    EmptyResponse,

    /// Response body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Http(e.to_string())
    }
}

/// Failure of a single extraction strategy
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("DOCX parsing failed: {0}")]
    Docx(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    /// An external program the strategy shells out to is not installed
    #[error("{0} is not installed")]
    ToolUnavailable(&'static str),

    /// The strategy panicked (malformed fonts in pdf-extract, mostly)
    #[error("{0} panicked")]
    Panicked(&'static str),
}

/// Failure while writing an output document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to pack {path}: {message}")]
    Pack { path: PathBuf, message: String },
}

/// Top-level error for the binary
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("input directory {0} does not exist")]
    MissingInput(PathBuf),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
