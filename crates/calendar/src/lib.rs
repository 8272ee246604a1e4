//! # hydrofill-calendar
//!
//! Dense daily time axis for the Gregorian calendar.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["start, end (NaiveDate)"] -->|"DailyAxis::new()"| B["DailyAxis"]
//!     B -->|".days_of_year()"| C["1..=366 per step"]
//!     B -->|".calendar_months()"| D["0..=11 per step"]
//!     B -->|".absolute_months()"| E["months since start"]
//!     B -->|".index_of()"| F["Option of usize"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use hydrofill_calendar::DailyAxis;
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
//! let axis = DailyAxis::new(start, end)?;
//! assert_eq!(axis.len(), 6210);
//! assert_eq!(axis.days_of_year()[365], 366); // 2000 is a leap year
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `axis` | The dense daily axis and its derived per-step metadata |
//! | `doy` | Day-of-year and month derivations for a single date |
//! | `error` | Error types |

mod axis;
mod doy;
mod error;

pub use axis::{DailyAxis, parse_date};
pub use doy::{absolute_month, calendar_month, day_of_year};
pub use error::CalendarError;
