//! Record normalization and power statistics.
//!
//! Both operations are single-pass and stateless. Neither one validates its
//! input: a `power` without digits becomes `None` (and turns the mean into
//! `NaN`), and a birth date that does not split into three numeric fields
//! becomes [`CalendarDate::Invalid`]. Use [`super::strict`] to reject such
//! records instead.
//!
//! ```rust
//! use roster::{arithmetic_mean, normalize, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new("Stepha", "squiddinton0", "481", "Female", "07.10.1996")
//!         .with_last_name("Quiddinton"),
//!     RawRecord::new("Kenneth", "kbeavers2", "463", "Male", "18.10.1990"),
//! ];
//!
//! let normalized = normalize(&records);
//! assert_eq!(normalized[0].full_name, "Stepha Quiddinton");
//! assert_eq!(normalized[1].full_name, "Kenneth");
//! assert_eq!(arithmetic_mean(&records), 472.0);
//! ```

use crate::models::{CalendarDate, NormalizedRecord, RawRecord};

/// Normalize every record, preserving length and order.
pub fn normalize(records: &[RawRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}

/// Normalize a single record.
pub fn normalize_record(record: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        full_name: full_name(&record.first_name, record.last_name.as_deref()),
        username: record.username.clone(),
        power: parse_int(&record.power),
        birth_date: parse_birth_date(&record.birth_date),
    }
}

/// Mean of all `power` values.
///
/// Returns exactly `0.0` for an empty slice. The total is summed first and
/// divided once, so the result does not drift with record count.
pub fn arithmetic_mean(records: &[RawRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let mut total: i128 = 0;
    for record in records {
        match parse_int(&record.power) {
            Some(power) => total += i128::from(power),
            None => return f64::NAN,
        }
    }

    total as f64 / records.len() as f64
}

/// `first last`, or `first` alone when there is no (or an empty) surname.
pub fn full_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name {
        Some(last) if !last.is_empty() => format!("{} {}", first_name, last),
        _ => first_name.to_string(),
    }
}

/// Parse the leading base-10 integer of `text`.
///
/// Leading whitespace and one `+`/`-` sign are accepted, digits are consumed
/// up to the first non-digit and anything after is ignored. Returns `None`
/// when no digit is found or the value does not fit in an `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i128 = digits[..end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

/// Split `DD.MM.YYYY` on dots and build the date positionally.
///
/// Fields beyond the third are ignored; missing fields give an invalid date.
pub fn parse_birth_date(text: &str) -> CalendarDate {
    let mut fields = text.split('.').map(parse_int);
    let day = fields.next().flatten();
    let month = fields.next().flatten();
    let year = fields.next().flatten();

    CalendarDate::from_parts(year, month.and_then(|m| m.checked_sub(1)), day)
}
