//! Day-of-year and month derivations for a single Gregorian date.

use chrono::{Datelike, NaiveDate};

/// Day-of-year relative to the date's own year (1 = January 1, up to 366).
pub fn day_of_year(date: NaiveDate) -> u16 {
    // ordinal() is 1..=366, always fits.
    date.ordinal() as u16
}

/// Zero-based calendar month (0 = January, 11 = December).
pub fn calendar_month(date: NaiveDate) -> u8 {
    date.month0() as u8
}

/// Number of whole months between the month containing `origin` and the
/// month containing `date`.
///
/// Zero for any date in the origin's month. Negative when `date` falls in an
/// earlier month than `origin`.
pub fn absolute_month(date: NaiveDate, origin: NaiveDate) -> i32 {
    let months = |d: NaiveDate| 12 * d.year() + d.month0() as i32;
    months(date) - months(origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn doy_jan_first_is_one() {
        assert_eq!(day_of_year(ymd(2001, 1, 1)), 1);
    }

    #[test]
    fn doy_dec_31_leap_and_common() {
        assert_eq!(day_of_year(ymd(2000, 12, 31)), 366);
        assert_eq!(day_of_year(ymd(2001, 12, 31)), 365);
    }

    #[test]
    fn doy_mar_first_shifts_in_leap_year() {
        assert_eq!(day_of_year(ymd(2001, 3, 1)), 60);
        assert_eq!(day_of_year(ymd(2004, 3, 1)), 61);
    }

    #[test]
    fn calendar_month_is_zero_based() {
        assert_eq!(calendar_month(ymd(2000, 1, 15)), 0);
        assert_eq!(calendar_month(ymd(2000, 12, 15)), 11);
    }

    #[test]
    fn absolute_month_counts_from_origin_month() {
        let origin = ymd(2000, 3, 20);
        assert_eq!(absolute_month(ymd(2000, 3, 1), origin), 0);
        assert_eq!(absolute_month(ymd(2000, 4, 1), origin), 1);
        assert_eq!(absolute_month(ymd(2001, 3, 31), origin), 12);
        assert_eq!(absolute_month(ymd(2000, 2, 29), origin), -1);
    }
}
