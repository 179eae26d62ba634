//! Error types for the Roster backend.
//!
//! The transform engine itself never fails: malformed input degrades into
//! "no value" powers and invalid dates. Errors only exist around it:
//!
//! - [`RecordError`] - Strict-mode rejection of a malformed record
//! - [`SourceError`] - Loading records from JSON/CSV sources
//! - [`PipelineError`] - Load-and-transform orchestration errors
//! - [`FeedError`] - Posts API client errors
//! - [`ServerError`] - HTTP API errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Strict Record Errors
// =============================================================================

/// A record rejected by the strict transform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// `power` is not a plain base-10 integer.
    #[error("Record {index}: invalid power '{value}'")]
    InvalidPower { index: usize, value: String },

    /// `birth_date` is not a real `DD.MM.YYYY` date.
    #[error("Record {index}: invalid birth date '{value}'")]
    InvalidBirthDate { index: usize, value: String },
}

impl RecordError {
    /// Index of the offending record in the input sequence.
    pub fn index(&self) -> usize {
        match self {
            Self::InvalidPower { index, .. } | Self::InvalidBirthDate { index, .. } => *index,
        }
    }
}

// =============================================================================
// Record Source Errors
// =============================================================================

/// Errors while reading raw records from a file or byte buffer.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be decoded.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Invalid JSON document.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid CSV document.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required CSV column is missing.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Nothing to read.
    #[error("Input is empty")]
    Empty,
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors from [`crate::transform::pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Records could not be loaded.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Strict transform rejected a record.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

// =============================================================================
// Feed Errors
// =============================================================================

/// Errors from the posts API client.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// Client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Load or transform failed.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Posts API error.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for strict record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Result type for record loading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for posts API operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
