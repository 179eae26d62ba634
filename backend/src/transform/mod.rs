//! Transformation module.
//!
//! - Engine: lenient normalization and mean of `power`
//! - Strict: the same operations, rejecting malformed records
//! - Pipeline: load, transform and report

pub mod engine;
pub mod pipeline;
pub mod strict;

pub use engine::{arithmetic_mean, normalize, normalize_record, parse_birth_date, parse_int};
pub use pipeline::*;
pub use strict::{check_records, try_arithmetic_mean, try_normalize};
