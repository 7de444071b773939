//! Dates and year-fraction conventions.
//!
//! The lattice measures every time in years from the valuation date. This
//! module turns calendar dates (quote dates, expirations, ex-dividend dates)
//! into those year fractions.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{year_fraction_364, Date};
//!
//! let quote = Date::from_ymd(2021, 6, 1).unwrap();
//! let ex_div = Date::from_ymd(2021, 6, 18).unwrap();
//!
//! assert!((year_fraction_364(quote, ex_div) - 17.0 / 364.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2021, 9, 17).unwrap();
/// let parsed: Date = "2021-09-17".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2021, 9, 1).unwrap();
/// assert_eq!(date - start, 16);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored; a blank field is a parse error.
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::parse(" 2021-03-19 ").is_ok());
    /// assert!(Date::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::ParseError("empty date field".to_string()));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", trimmed, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the signed number of days from `other` to `self`.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day count convention used to convert a day count into years.
///
/// Expirations and dividend dates are quoted on a 364-day year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual/364: 52 weeks of 7 days.
    #[default]
    Actual364,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Actual364.name(), "ACT/364");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Actual364 => "ACT/364",
        }
    }

    /// Days in the convention's year.
    #[inline]
    pub fn days_per_year(&self) -> f64 {
        match self {
            DayCountConvention::Actual364 => 364.0,
        }
    }

    /// Year fraction from `start` to `end`.
    ///
    /// Negative when `end` precedes `start`; callers use the sign to tell
    /// past events from future ones.
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        (end - start) as f64 / self.days_per_year()
    }
}

/// Years between two dates on the 364-day year: `(end - start) / 364 days`.
///
/// This is the convention the pricer's inputs are quoted in.
#[inline]
pub fn year_fraction_364(start: Date, end: Date) -> f64 {
    DayCountConvention::Actual364.year_fraction_dates(start, end)
}
