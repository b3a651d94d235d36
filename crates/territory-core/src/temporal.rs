//! # Temporal Types: Inclusive Calendar Date Ranges
//!
//! Events are scheduled on calendar dates with no time-of-day component.
//! A [`DateRange`] is closed on both ends: an event running
//! `2024-03-15..=2024-03-15` occupies exactly one day.
//!
//! ## Invariant
//!
//! `end >= start` is enforced at construction, including when a range is
//! deserialized. An absent end date defaults to the start date, matching the
//! single-day event the submitter most likely meant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] if the string is not a valid
/// ISO 8601 calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeRepr", into = "DateRangeRepr")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Wire form of [`DateRange`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct DateRangeRepr {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    /// Create a range from explicit start and end dates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedDateRange`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvertedDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Create a range starting on `start`, defaulting the end to `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedDateRange`] if `end` is supplied
    /// and precedes `start`.
    pub fn starting(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, ValidationError> {
        Self::new(start, end.unwrap_or(start))
    }

    /// A range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Parse a range from `YYYY-MM-DD` strings. An empty or absent end
    /// defaults to the start.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the start is empty, or
    /// any error from [`parse_date`] and [`DateRange::new`].
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, ValidationError> {
        if start.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "start date",
            });
        }
        let start = parse_date(start)?;
        let end = match end.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) => Some(parse_date(e)?),
            None => None,
        };
        Self::starting(start, end)
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `day` falls within the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} to {}", self.start, self.end)
        }
    }
}

impl TryFrom<DateRangeRepr> for DateRange {
    type Error = ValidationError;

    fn try_from(repr: DateRangeRepr) -> Result<Self, Self::Error> {
        Self::new(repr.start_date, repr.end_date)
    }
}

impl From<DateRange> for DateRangeRepr {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start,
            end_date: range.end,
        }
    }
}
