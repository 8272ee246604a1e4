//! Error types for the hydrofill-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the hydrofill-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when the end of a requested range precedes its start.
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// First day of the requested range.
        start: NaiveDate,
        /// Last day of the requested range.
        end: NaiveDate,
    },

    /// Returned when a date string cannot be parsed.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate {
        /// The text that failed to parse.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_range() {
        let err = CalendarError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: end 2000-12-31 is before start 2001-01-01"
        );
    }

    #[test]
    fn error_invalid_date() {
        let err = CalendarError::InvalidDate {
            input: "2000-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date '2000-13-01': input is out of range"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
