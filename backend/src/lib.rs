//! # Roster - person record normalization and posts browsing
//!
//! Roster turns raw person records (as found in a fixed dataset, a JSON
//! array or a CSV file) into display-ready records and computes the mean of
//! their `power` values. A small client for a public posts API and an HTTP
//! server expose the same data to front ends.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ JSON / CSV  │────▶│   Parser    │────▶│  Transform  │────▶│   Report    │
//! │  (any enc.) │     │ (auto-det.) │     │ (normalize) │     │ (+ mean)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use roster::{arithmetic_mean, normalize, dataset::sample_records};
//!
//! let records = sample_records();
//! let normalized = normalize(&records);
//! assert_eq!(normalized[0].full_name, "Stepha Quiddinton");
//! assert_eq!(arithmetic_mean(&records), 546.2);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Raw and normalized records, calendar dates, posts
//! - [`dataset`] - Embedded sample records
//! - [`parser`] - JSON/CSV loading with auto-detection
//! - [`transform`] - Engine, strict mode and pipeline
//! - [`validation`] - Raw record schema validation
//! - [`feed`] - Posts API client
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;
pub mod config;

// Sources
pub mod dataset;
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Posts API
pub mod feed;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{FeedError, PipelineError, RecordError, ServerError, SourceError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CalendarDate, NormalizedRecord, Post, PostWithAuthor, RawRecord, User};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::engine::{arithmetic_mean, normalize};
pub use transform::strict::{try_arithmetic_mean, try_normalize};
pub use transform::pipeline::{
    demonstrate,
    transform_bytes,
    transform_file,
    transform_records,
    TransformOptions,
    TransformReport,
};

// =============================================================================
// Re-exports - Sources and validation
// =============================================================================

pub use parser::{parse_bytes_auto, parse_file_auto, parse_records_json, ParseResult};
pub use validation::{validate_raw_record, validate_raw_records};

// =============================================================================
// Re-exports - Feed, config, server
// =============================================================================

pub use config::Settings;
pub use feed::FeedClient;

pub mod server {
    pub use crate::api::server::start_server;
}
