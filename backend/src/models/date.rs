//! Lenient calendar dates.
//!
//! Construction takes `(year, month_index, day)` with a zero-based month and
//! never rejects out-of-range components: they roll over into neighbouring
//! months and years, so `31.02.2000` lands on 2 March 2000. Missing
//! components, or a result chrono cannot represent, give [`CalendarDate::Invalid`].

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Serialize, Serializer};

/// A year/month/day value, or the invalid-date sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarDate {
    /// A representable Gregorian date.
    Valid(NaiveDate),
    /// Components were missing or not numeric.
    Invalid,
}

impl CalendarDate {
    /// Build a date from optional components, `month_index` being zero-based.
    pub fn from_parts(year: Option<i64>, month_index: Option<i64>, day: Option<i64>) -> Self {
        match (year, month_index, day) {
            (Some(y), Some(m), Some(d)) => roll_over(y, m, d).map_or(Self::Invalid, Self::Valid),
            _ => Self::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The underlying chrono date, if valid.
    pub fn as_naive(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.as_naive().map(|d| d.year())
    }

    /// Calendar month, 1 = January.
    pub fn month(&self) -> Option<u32> {
        self.as_naive().map(|d| d.month())
    }

    /// Zero-based month, 0 = January.
    pub fn month_index(&self) -> Option<u32> {
        self.as_naive().map(|d| d.month0())
    }

    pub fn day(&self) -> Option<u32> {
        self.as_naive().map(|d| d.day())
    }
}

fn roll_over(year: i64, month_index: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month_index)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Invalid => f.write_str("Invalid Date"),
        }
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            Self::Invalid => serializer.serialize_none(),
        }
    }
}
