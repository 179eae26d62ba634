//! High-level API: load records, transform them and summarize the result.
//!
//! # Example
//!
//! ```rust
//! use roster::{dataset::sample_records, transform_records, TransformOptions};
//!
//! let report = transform_records(sample_records(), &TransformOptions::default()).unwrap();
//! assert_eq!(report.count, 10);
//! assert_eq!(report.mean_rounded, "546.20");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::engine::{arithmetic_mean, normalize};
use super::strict::{try_arithmetic_mean, try_normalize};
use crate::api::logs::{log_info, log_success, log_warning, log_warning_indent};
use crate::error::PipelineResult;
use crate::models::{NormalizedRecord, RawRecord};
use crate::parser::{parse_bytes_auto, parse_file_auto, ParseResult, SourceFormat};
use crate::validation::validate_raw_records;

/// Validation errors shown per invalid record.
const MAX_LOGGED_ERRORS: usize = 5;

/// Options for the transformation pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Reject malformed records instead of carrying degenerate values
    pub strict: bool,

    /// Check records against the raw record schema and report violations
    pub validate: bool,
}

/// Where the records came from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub encoding: String,
    pub format: SourceFormat,
    pub delimiter: Option<char>,
    pub headers: Vec<String>,
}

impl From<&ParseResult> for SourceInfo {
    fn from(parsed: &ParseResult) -> Self {
        Self {
            encoding: parsed.encoding.clone(),
            format: parsed.format,
            delimiter: parsed.delimiter,
            headers: parsed.headers.clone(),
        }
    }
}

/// Original data, transformed data and the mean of `power`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReport {
    /// Records as received
    pub original: Vec<RawRecord>,

    /// Normalized records, same order as `original`
    pub transformed: Vec<NormalizedRecord>,

    /// Mean of `power`. `NaN` (serialized as `null`) if any power is malformed.
    pub mean: f64,

    /// Mean with two decimals, as displayed
    pub mean_rounded: String,

    /// Number of records
    pub count: usize,

    /// Schema violations (record index, errors), when validation was requested
    pub validation_errors: Vec<(usize, Vec<String>)>,

    /// Present when records were read from a file or upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
}

/// Transform already-loaded records.
pub fn transform_records(
    records: Vec<RawRecord>,
    options: &TransformOptions,
) -> PipelineResult<TransformReport> {
    log_info(format!("⚙️  Transforming {} records...", records.len()));

    let validation_errors = if options.validate {
        let errors = validate_raw_records(&records);
        if errors.is_empty() {
            log_success("All records match the raw record schema");
        } else {
            log_warning(format!("{} records violate the raw record schema", errors.len()));
            for (index, errs) in errors.iter().take(MAX_LOGGED_ERRORS) {
                log_warning_indent(format!("Record {}: {}", index, errs.join("; ")), 1);
            }
        }
        errors
    } else {
        Vec::new()
    };

    let (transformed, mean) = if options.strict {
        (try_normalize(&records)?, try_arithmetic_mean(&records)?)
    } else {
        (normalize(&records), arithmetic_mean(&records))
    };

    if mean.is_nan() {
        log_warning("Mean is not a number: some power values are not integers");
    } else {
        log_success(format!("Mean power: {:.2}", mean));
    }

    Ok(TransformReport {
        count: records.len(),
        original: records,
        transformed,
        mean,
        mean_rounded: format!("{:.2}", mean),
        validation_errors,
        source: None,
    })
}

/// Load records from raw bytes (JSON or CSV) and transform them.
pub fn transform_bytes(
    bytes: &[u8],
    options: &TransformOptions,
) -> PipelineResult<TransformReport> {
    let parsed = parse_bytes_auto(bytes)?;
    transform_parsed(parsed, options)
}

/// Load records from a file (JSON or CSV) and transform them.
pub fn transform_file(
    path: &Path,
    options: &TransformOptions,
) -> PipelineResult<TransformReport> {
    log_info(format!("📖 Reading {}", path.display()));
    let parsed = parse_file_auto(path)?;
    transform_parsed(parsed, options)
}

fn transform_parsed(
    parsed: ParseResult,
    options: &TransformOptions,
) -> PipelineResult<TransformReport> {
    let source = SourceInfo::from(&parsed);
    log_success(format!(
        "Read {} records ({:?}, {})",
        parsed.records.len(),
        parsed.format,
        parsed.encoding
    ));

    let mut report = transform_records(parsed.records, options)?;
    report.source = Some(source);
    Ok(report)
}

/// Render original data, transformed data and the mean as text.
pub fn demonstrate(records: &[RawRecord]) -> Result<String, serde_json::Error> {
    let transformed = normalize(records);
    let mean = arithmetic_mean(records);

    Ok(format!(
        "=== Original Data ===\n{}\n\n\
         === Transformed Data ===\n{}\n\n\
         === Arithmetic Mean of Power Values ===\n\
         Arithmetic Mean: {}\n\
         Rounded to 2 decimal places: {:.2}\n",
        serde_json::to_string_pretty(records)?,
        serde_json::to_string_pretty(&transformed)?,
        mean,
        mean,
    ))
}
