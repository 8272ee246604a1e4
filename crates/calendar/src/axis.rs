//! Dense daily time axis.

use chrono::{Days, NaiveDate};

use crate::doy::{absolute_month, calendar_month, day_of_year};
use crate::error::CalendarError;

/// Parses an ISO `YYYY-MM-DD` date, ignoring anything after the first ten
/// characters (so `"2004-06-01 00:00:00"` is accepted).
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the date portion does not parse.
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = input.trim();
    let date_str = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| CalendarError::InvalidDate {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// An ordered run of consecutive calendar days, start and end inclusive.
///
/// Per-step metadata (day-of-year, calendar month, absolute month) is
/// computed once at construction and shared read-only by every series
/// aligned to this axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAxis {
    dates: Vec<NaiveDate>,
    /// Day-of-year of each step (1..=366).
    days_of_year: Vec<u16>,
    /// Calendar month of each step (0..=11).
    calendar_months: Vec<u8>,
    /// Months elapsed since the start month (0-based).
    absolute_months: Vec<u32>,
}

impl DailyAxis {
    /// Creates the axis covering every day from `start` through `end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }

        let n_days = (end - start).num_days() as usize + 1;
        let mut dates = Vec::with_capacity(n_days);
        let mut current = start;
        for _ in 0..n_days {
            dates.push(current);
            // Bounded by `end`, which is itself representable.
            current = current.checked_add_days(Days::new(1)).unwrap_or(current);
        }

        let days_of_year = dates.iter().map(|&d| day_of_year(d)).collect();
        let calendar_months = dates.iter().map(|&d| calendar_month(d)).collect();
        let absolute_months = dates
            .iter()
            .map(|&d| absolute_month(d, start) as u32)
            .collect();

        Ok(Self {
            dates,
            days_of_year,
            calendar_months,
            absolute_months,
        })
    }

    /// Returns the number of days on the axis.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the axis holds no days. Never true for an axis built
    /// with [`DailyAxis::new`].
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First day on the axis.
    pub fn start(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last day on the axis.
    pub fn end(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// All dates, in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Day-of-year of each step.
    pub fn days_of_year(&self) -> &[u16] {
        &self.days_of_year
    }

    /// Zero-based calendar month of each step.
    pub fn calendar_months(&self) -> &[u8] {
        &self.calendar_months
    }

    /// Zero-based month count since the start month, per step.
    pub fn absolute_months(&self) -> &[u32] {
        &self.absolute_months
    }

    /// Position of `date` on the axis, or `None` when it lies outside.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start() || date > self.end() {
            return None;
        }
        Some((date - self.start()).num_days() as usize)
    }
}
