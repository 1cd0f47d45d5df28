//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors and `validate` methods.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use profitcast::domain::error::DomainError;
//! use profitcast::domain::range::DateRange;
//!
//! let from = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!
//! assert!(matches!(
//!     DateRange::new(from, to),
//!     Err(DomainError::InvertedRange { .. })
//! ));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Identifiers must contain at least one non-whitespace character.
    #[error("{kind} id cannot be empty")]
    EmptyId {
        /// Which identifier was empty.
        kind: &'static str,
    },

    /// A date range must not end before it starts.
    #[error("date range is inverted: from {from} is after to {to}")]
    InvertedRange {
        /// Requested start date.
        from: NaiveDate,
        /// Requested end date.
        to: NaiveDate,
    },

    /// A date range must not exceed the configured span.
    #[error("date range spans {days} days, maximum is {max}")]
    RangeTooLong {
        /// Requested span, inclusive of both ends.
        days: i64,
        /// Maximum allowed span.
        max: u32,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Name of the offending field.
        field: &'static str,
        /// The raw input.
        value: String,
    },

    /// Revenue cannot be negative.
    #[error("revenue must not be negative, got {revenue}")]
    NegativeRevenue {
        /// The invalid revenue.
        revenue: Decimal,
    },

    /// Spend cannot be negative.
    #[error("spend must not be negative, got {spend}")]
    NegativeSpend {
        /// The invalid spend.
        spend: Decimal,
    },

    /// Ad groups need a display name.
    #[error("ad group name cannot be empty")]
    EmptyName,

    /// A value expected in `[0, 1]` fell outside it.
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange {
        /// Name of the offending field.
        field: &'static str,
        /// The invalid value.
        value: Decimal,
    },

    /// An enumerated value was not recognised.
    #[error("unknown {kind}: '{value}'")]
    UnknownVariant {
        /// Which enumeration was being parsed.
        kind: &'static str,
        /// The raw input.
        value: String,
    },
}
