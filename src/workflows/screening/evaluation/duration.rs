use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use super::super::domain::ExperienceEnd;

/// Calendar month used as a duration bound. Days are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthYear {
    pub year: i32,
    pub month: u32,
}

impl MonthYear {
    /// Parse `MM/YYYY` (single-digit months accepted).
    pub fn parse(raw: &str) -> Result<Self, DurationError> {
        let trimmed = raw.trim();
        let (month, year) = trimmed
            .split_once('/')
            .ok_or_else(|| DurationError::MissingSeparator(raw.to_string()))?;

        if !(1..=2).contains(&month.len()) || year.len() != 4 {
            return Err(DurationError::NotNumeric(raw.to_string()));
        }
        if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(DurationError::NotNumeric(raw.to_string()));
        }

        let month: u32 = month
            .parse()
            .map_err(|_| DurationError::NotNumeric(raw.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DurationError::NotNumeric(raw.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(DurationError::MonthOutOfRange {
                raw: raw.to_string(),
                month,
            });
        }

        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Signed count of whole months from `self` to `later`.
    pub fn months_until(self, later: MonthYear) -> i64 {
        let years = i64::from(later.year) - i64::from(self.year);
        let months = i64::from(later.month) - i64::from(self.month);
        years * 12 + months
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Reasons a `MM/YYYY` bound could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("'{0}' is missing the '/' between month and year")]
    MissingSeparator(String),
    #[error("'{0}' is not a numeric MM/YYYY value")]
    NotNumeric(String),
    #[error("'{raw}' has month {month} outside 1-12")]
    MonthOutOfRange { raw: String, month: u32 },
}

/// Resolve both bounds of an experience. `Present` becomes the month of `today`.
fn experience_bounds(
    start: &str,
    end: &ExperienceEnd,
    today: NaiveDate,
) -> Result<(MonthYear, MonthYear), DurationError> {
    let start = MonthYear::parse(start)?;
    let end = match end {
        ExperienceEnd::Month(raw) => MonthYear::parse(raw)?,
        ExperienceEnd::Present => MonthYear::from_date(today),
    };
    Ok((start, end))
}

/// Elapsed time between two bounds in fractional years, never negative.
///
/// Malformed bounds yield `0.0`; the anomaly is logged and otherwise swallowed so
/// a single bad entry cannot stop a scoring batch.
pub fn duration_years(start: &str, end: &ExperienceEnd, today: NaiveDate) -> f64 {
    match experience_bounds(start, end, today) {
        Ok((start, end)) => {
            let months = start.months_until(end).max(0);
            months as f64 / 12.0
        }
        Err(err) => {
            tracing::warn!(start, end = %end, error = %err, "unreadable experience dates, using zero duration");
            0.0
        }
    }
}

/// Same as [`duration_years`] with the local clock standing in for `Present`.
pub fn duration_years_from_today(start: &str, end: &ExperienceEnd) -> f64 {
    duration_years(start, end, Local::now().date_naive())
}
