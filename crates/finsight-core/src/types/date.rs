//! Date type for instrument schedules.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::YearMonth;

/// A calendar date.
///
/// Newtype wrapper around `chrono::NaiveDate`. Serializes as an ISO 8601
/// string (`YYYY-MM-DD`).
///
/// # Example
///
/// ```rust
/// use finsight_core::types::Date;
///
/// let start = Date::parse("2024-01-01").unwrap();
/// let maturity = start.checked_add_days(360).unwrap();
/// assert_eq!(maturity.to_string(), "2024-12-26");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days, failing instead of overflowing the calendar.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn checked_add_days(&self, days: u64) -> CoreResult<Self> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} + {days} days is out of range")))
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the month this date falls in.
    #[must_use]
    pub fn year_month(&self) -> YearMonth {
        // NaiveDate months are always 1..=12
        YearMonth::from_parts(self.year(), self.month())
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
        assert!(Date::parse("2025-02-30").is_err());
        assert!(Date::parse("not a date").is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2024-01-01".parse().unwrap();
        assert_eq!(date.to_string(), "2024-01-01");
        assert_eq!(Date::parse(" 2024-03-09 ").unwrap().day(), 9);
    }

    #[test]
    fn test_checked_add_days() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let later = start.checked_add_days(360).unwrap();
        assert_eq!(later, Date::from_ymd(2024, 12, 26).unwrap());
        assert_eq!(start.days_between(&later), 360);

        assert!(start.checked_add_days(u64::MAX).is_err());
    }

    #[test]
    fn test_year_month() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.year_month().to_string(), "2024-02");
    }

    #[test]
    fn test_serde_as_string() {
        let date = Date::from_ymd(2024, 7, 4).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-07-04\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
