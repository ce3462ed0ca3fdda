//! Year-month key for monthly aggregates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar month, the key under which expenses, assets and liabilities are
/// aggregated.
///
/// Orders chronologically and serializes as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year-month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidMonth` if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::invalid_month(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub(crate) fn from_parts(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// Parses a `YYYY-MM` key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidMonth` if the string is malformed.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| CoreError::invalid_month(format!("Cannot parse: {s}")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| CoreError::invalid_month(format!("Cannot parse year: {s}")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| CoreError::invalid_month(format!("Cannot parse month: {s}")))?;
        Self::new(year, month)
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves forward (or backward, for negative `months`) by whole months.
    ///
    /// Saturates at the first and last representable months.
    #[must_use]
    pub fn add_months(&self, months: i32) -> Self {
        self.checked_add_months(months).unwrap_or(if months < 0 {
            Self::from_parts(i32::MIN, 1)
        } else {
            Self::from_parts(i32::MAX, 12)
        })
    }

    /// Moves by whole months, or `None` if the year leaves the `i32` range.
    #[must_use]
    pub fn checked_add_months(&self, months: i32) -> Option<Self> {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = u32::try_from(total.rem_euclid(12) + 1).ok()?;
        Some(Self::from_parts(year, month))
    }

    /// Returns the following month.
    ///
    /// Saturates at the last representable month; see [`YearMonth::checked_next`].
    #[must_use]
    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    /// Returns the following month, or `None` after the last representable one.
    #[must_use]
    pub fn checked_next(&self) -> Option<Self> {
        self.checked_add_months(1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let ym = YearMonth::parse("2024-06").unwrap();
        assert_eq!(ym.year(), 2024);
        assert_eq!(ym.month(), 6);
        assert_eq!(ym.to_string(), "2024-06");

        assert!(YearMonth::parse("2024-13").is_err());
        assert!(YearMonth::parse("2024-00").is_err());
        assert!(YearMonth::parse("202406").is_err());
        assert!(YearMonth::parse("abcd-01").is_err());
    }

    #[test]
    fn test_add_months_rolls_year() {
        let nov = YearMonth::new(2024, 11).unwrap();
        assert_eq!(nov.next(), YearMonth::new(2024, 12).unwrap());
        assert_eq!(nov.add_months(2), YearMonth::new(2025, 1).unwrap());
        assert_eq!(nov.add_months(14), YearMonth::new(2026, 1).unwrap());
        assert_eq!(nov.add_months(-11), YearMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_add_months_saturates_at_year_bounds() {
        let last = YearMonth::new(i32::MAX, 12).unwrap();
        assert_eq!(last.checked_next(), None);
        assert_eq!(last.next(), last);

        let nov = YearMonth::new(i32::MAX, 11).unwrap();
        assert_eq!(nov.checked_next(), Some(last));

        let first = YearMonth::new(i32::MIN, 1).unwrap();
        assert_eq!(first.checked_add_months(-1), None);
        assert_eq!(first.add_months(-5), first);
    }

    #[test]
    fn test_ordering() {
        let a = YearMonth::new(2023, 12).unwrap();
        let b = YearMonth::new(2024, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_as_string() {
        let ym = YearMonth::new(2024, 3).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
        assert!(serde_json::from_str::<YearMonth>("\"2024-15\"").is_err());
    }
}
