//! Inclusive calendar date ranges used by every report query.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::error::DomainError;

/// Inclusive `[from, to]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `from > to`.
    ///
    /// # Errors
    /// Returns [`DomainError::InvertedRange`] when the bounds are reversed.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DomainError> {
        if from > to {
            return Err(DomainError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering exactly one day.
    #[must_use]
    pub fn single(date: NaiveDate) -> Self {
        Self { from: date, to: date }
    }

    /// The `days` most recent days ending at (and including) `end`.
    ///
    /// A `days` value of zero is treated as one.
    #[must_use]
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let back = i64::from(days.max(1)) - 1;
        Self {
            from: end - Duration::days(back),
            to: end,
        }
    }

    /// Fill in missing report bounds.
    ///
    /// No bounds yield the `default_days` ending `today`. A lone `from` runs
    /// through `today`; a lone `to` reaches back `default_days`.
    ///
    /// # Errors
    /// Returns [`DomainError::InvertedRange`] when `from` is after `to`.
    pub fn with_defaults(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
        default_days: u32,
    ) -> Result<Self, DomainError> {
        match (from, to) {
            (None, None) => Ok(Self::trailing(today, default_days)),
            (None, Some(to)) => Ok(Self::trailing(to, default_days)),
            (Some(from), None) => Self::new(from, today.max(from)),
            (Some(from), Some(to)) => Self::new(from, to),
        }
    }

    /// Parse `YYYY-MM-DD` input for the named field.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidDate`] for malformed input.
    pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, DomainError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DomainError::InvalidDate {
            field,
            value: raw.to_string(),
        })
    }

    #[must_use]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of days covered, inclusive of both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Reject ranges longer than `max` days.
    ///
    /// # Errors
    /// Returns [`DomainError::RangeTooLong`] when the span exceeds `max`.
    pub fn ensure_max_days(&self, max: u32) -> Result<(), DomainError> {
        let days = self.days();
        if days > i64::from(max) {
            return Err(DomainError::RangeTooLong { days, max });
        }
        Ok(())
    }
}
