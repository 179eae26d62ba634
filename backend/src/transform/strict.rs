//! Strict variants of the transform.
//!
//! Same output as [`super::engine`] for well-formed records, but a record
//! whose `power` is not a plain integer or whose `birth_date` is not a real
//! `DD.MM.YYYY` date is rejected with a [`RecordError`] instead of being
//! carried through as a degenerate value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::engine::full_name;
use crate::error::{RecordError, RecordResult};
use crate::models::{CalendarDate, NormalizedRecord, RawRecord};

static POWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("Invalid power pattern"));

static BIRTH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").expect("Invalid birth date pattern"));

/// Normalize every record, failing on the first malformed one.
pub fn try_normalize(records: &[RawRecord]) -> RecordResult<Vec<NormalizedRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| try_normalize_record(index, record))
        .collect()
}

/// Mean of all `power` values, failing on the first malformed one.
///
/// Empty input still yields `0.0`.
pub fn try_arithmetic_mean(records: &[RawRecord]) -> RecordResult<f64> {
    if records.is_empty() {
        return Ok(0.0);
    }

    let mut total: i128 = 0;
    for (index, record) in records.iter().enumerate() {
        total += i128::from(strict_power(index, &record.power)?);
    }

    Ok(total as f64 / records.len() as f64)
}

/// Collect every strict error instead of stopping at the first one.
pub fn check_records(records: &[RawRecord]) -> Vec<RecordError> {
    let mut errors = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if let Err(e) = strict_power(index, &record.power) {
            errors.push(e);
        }
        if let Err(e) = strict_birth_date(index, &record.birth_date) {
            errors.push(e);
        }
    }
    errors
}

fn try_normalize_record(index: usize, record: &RawRecord) -> RecordResult<NormalizedRecord> {
    Ok(NormalizedRecord {
        full_name: full_name(&record.first_name, record.last_name.as_deref()),
        username: record.username.clone(),
        power: Some(strict_power(index, &record.power)?),
        birth_date: CalendarDate::Valid(strict_birth_date(index, &record.birth_date)?),
    })
}

fn strict_power(index: usize, text: &str) -> RecordResult<i64> {
    let invalid = || RecordError::InvalidPower {
        index,
        value: text.to_string(),
    };

    if !POWER_RE.is_match(text) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

fn strict_birth_date(index: usize, text: &str) -> RecordResult<NaiveDate> {
    let invalid = || RecordError::InvalidBirthDate {
        index,
        value: text.to_string(),
    };

    let caps = BIRTH_DATE_RE.captures(text).ok_or_else(invalid)?;
    let day: u32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let year: i32 = caps[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_records;
    use crate::transform::engine::{arithmetic_mean, normalize};

    fn record(power: &str, birth_date: &str) -> RawRecord {
        RawRecord::new("Test", "test0", power, "Male", birth_date)
    }

    #[test]
    fn test_strict_matches_lenient_on_clean_data() {
        let records = sample_records();
        assert_eq!(try_normalize(&records).unwrap(), normalize(&records));
        assert_eq!(
            try_arithmetic_mean(&records).unwrap(),
            arithmetic_mean(&records)
        );
    }

    #[test]
    fn test_rejects_trailing_garbage_in_power() {
        let err = try_normalize(&[record("481px", "07.10.1996")]).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidPower {
                index: 0,
                value: "481px".into()
            }
        );
    }

    #[test]
    fn test_rejects_impossible_date() {
        let records = vec![record("481", "07.10.1996"), record("500", "31.02.2000")];
        let err = try_normalize(&records).unwrap_err();
        assert!(matches!(err, RecordError::InvalidBirthDate { index: 1, .. }));
    }

    #[test]
    fn test_rejects_wrong_date_shape() {
        assert!(try_normalize(&[record("481", "7.10.1996")]).is_err());
        assert!(try_normalize(&[record("481", "07.10.1996.1")]).is_err());
        assert!(try_normalize(&[record("481", "1996-10-07")]).is_err());
    }

    #[test]
    fn test_mean_error_names_record() {
        let records = vec![record("481", "07.10.1996"), record("", "07.10.1996")];
        let err = try_arithmetic_mean(&records).unwrap_err();
        assert_eq!(err.index(), 1);
    }

    #[test]
    fn test_strict_mean_of_empty_is_zero() {
        assert_eq!(try_arithmetic_mean(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_check_records_collects_all() {
        let records = vec![
            record("x", "07.10.1996"),
            record("481", "07.10.1996"),
            record("y", "99.99.9999"),
        ];
        let errors = check_records(&records);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].index(), 0);
        assert_eq!(errors[1].index(), 2);
    }
}
