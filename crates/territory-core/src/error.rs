//! # Error Hierarchy
//!
//! Validation errors for the Territory Manager's records, built with
//! `thiserror`. Every variant carries the offending input so that the
//! submitter can correct it without guesswork.
//!
//! Validation failures are always recoverable: the write is rejected and no
//! state changes.

use thiserror::Error;

/// Validation errors for domain records and primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or absent.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Postal code is not a five-digit code.
    #[error("invalid postal code: \"{0}\" (expected 5 digits)")]
    InvalidPostalCode(String),

    /// Date string is not a calendar date.
    #[error("invalid date: \"{value}\" ({reason})")]
    InvalidDate {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// End date precedes start date.
    #[error("end date {end} is before start date {start}")]
    InvertedDateRange {
        /// Start of the range.
        start: String,
        /// End of the range.
        end: String,
    },

    /// Display color is not a `#rrggbb` hex string.
    #[error("invalid color: \"{0}\" (expected #rrggbb)")]
    InvalidColor(String),

    /// Lifecycle status string is not recognised.
    #[error("invalid status: \"{value}\" (expected one of: {expected})")]
    InvalidStatus {
        /// The string that failed to parse.
        value: String,
        /// The accepted values, comma-separated.
        expected: &'static str,
    },

    /// Identifier string is not a UUID.
    #[error("invalid identifier: \"{0}\"")]
    InvalidId(String),
}
