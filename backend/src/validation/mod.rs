//! JSON Schema validation for raw records.
//!
//! The transform never validates its input. Callers that want to reject
//! malformed records before transforming them check them here against the
//! embedded draft 7 schema (`schemas/raw-record.json`):
//!
//! - `first_name`, `username`, `power`, `gender`, `birth_date` are required strings
//! - `last_name` is an optional string
//! - `power` is an optionally signed run of digits
//! - `birth_date` is shaped `DD.MM.YYYY`
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use roster::validation::{is_valid_raw_record, validate_raw_record};
//!
//! let record = json!({
//!     "first_name": "Kenneth",
//!     "username": "kbeavers2",
//!     "power": "463",
//!     "gender": "Male",
//!     "birth_date": "18.10.1990"
//! });
//! assert!(is_valid_raw_record(&record));
//!
//! let broken = json!({ "first_name": "Kenneth", "power": "lots" });
//! assert!(validate_raw_record(&broken).is_err());
//! ```

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::RawRecord;

static RAW_RECORD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/raw-record.json"))
        .expect("Invalid embedded schema")
});

static RAW_RECORD_VALIDATOR: Lazy<Validator> = Lazy::new(|| {
    jsonschema::draft7::new(&RAW_RECORD_SCHEMA).expect("Invalid embedded schema")
});

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;
    collect_errors(&validator, data)
}

fn collect_errors(validator: &Validator, data: &Value) -> Result<(), Vec<String>> {
    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick true/false check.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate one raw record.
pub fn validate_raw_record(data: &Value) -> Result<(), Vec<String>> {
    collect_errors(&RAW_RECORD_VALIDATOR, data)
}

/// Quick check of one raw record.
pub fn is_valid_raw_record(data: &Value) -> bool {
    RAW_RECORD_VALIDATOR.is_valid(data)
}

/// Validate typed records, returning `(index, errors)` for each invalid one.
pub fn validate_raw_records(records: &[RawRecord]) -> Vec<(usize, Vec<String>)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let value = match serde_json::to_value(record) {
                Ok(value) => value,
                Err(e) => return Some((index, vec![e.to_string()])),
            };
            validate_raw_record(&value).err().map(|errors| (index, errors))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_records;
    use serde_json::json;

    #[test]
    fn test_valid_record() {
        let record = json!({
            "first_name": "Stepha",
            "last_name": "Quiddinton",
            "username": "squiddinton0",
            "power": "481",
            "gender": "Female",
            "birth_date": "07.10.1996"
        });
        assert!(is_valid_raw_record(&record));
    }

    #[test]
    fn test_missing_fields() {
        let record = json!({ "first_name": "Stepha" });
        let errors = validate_raw_record(&record).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("username")));
        assert!(errors.iter().any(|e| e.contains("birth_date")));
    }

    #[test]
    fn test_bad_power_pattern() {
        let record = json!({
            "first_name": "Ham",
            "username": "hruslinge6",
            "power": "659px",
            "gender": "Male",
            "birth_date": "01.03.1991"
        });
        assert!(!is_valid_raw_record(&record));
    }

    #[test]
    fn test_bad_birth_date_shape() {
        let record = json!({
            "first_name": "Ham",
            "username": "hruslinge6",
            "power": "659",
            "gender": "Male",
            "birth_date": "1991-03-01"
        });
        let errors = validate_raw_record(&record).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("1991-03-01")));
    }

    #[test]
    fn test_last_name_must_be_string() {
        let record = json!({
            "first_name": "Ham",
            "last_name": 12,
            "username": "hruslinge6",
            "power": "659",
            "gender": "Male",
            "birth_date": "01.03.1991"
        });
        assert!(!is_valid_raw_record(&record));
    }

    #[test]
    fn test_sample_dataset_is_valid() {
        assert!(validate_raw_records(&sample_records()).is_empty());
    }

    #[test]
    fn test_compiled_validator_agrees_with_schema() {
        let broken = json!({ "first_name": "Kenneth", "power": "lots" });
        assert_eq!(
            validate_raw_record(&broken),
            validate(&RAW_RECORD_SCHEMA, &broken)
        );

        for record in sample_records() {
            let value = serde_json::to_value(&record).unwrap();
            assert!(RAW_RECORD_VALIDATOR.is_valid(&value));
            assert!(is_valid(&RAW_RECORD_SCHEMA, &value));
        }
    }

    #[test]
    fn test_large_batch_reports_every_invalid_record() {
        let records: Vec<_> = (0..500)
            .map(|i| {
                let mut record = sample_records()[i % 10].clone();
                if i % 100 == 0 {
                    record.power = "n/a".into();
                }
                record
            })
            .collect();

        let invalid = validate_raw_records(&records);
        let indices: Vec<usize> = invalid.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, [0, 100, 200, 300, 400]);
    }

    #[test]
    fn test_invalid_records_are_indexed() {
        let mut records = sample_records();
        records[4].power = "n/a".into();
        records[7].birth_date = "25/11/1998".into();

        let invalid = validate_raw_records(&records);
        let indices: Vec<usize> = invalid.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, [4, 7]);
    }
}
