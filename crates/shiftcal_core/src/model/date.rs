//! Calendar date and month values.
//!
//! # Responsibility
//! - Validate ISO `YYYY-MM-DD` strings at the core boundary.
//! - Provide month arithmetic for navigation and grid layout.
//!
//! # Invariants
//! - `IsoDate` always formats back to the exact canonical string it was
//!   parsed from.
//! - `YearMonth` always names a month in years `0000..=9999`, so every
//!   day of its six-week grid is representable.

use super::{ModelError, ModelResult};
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Years expressible in four-digit `YYYY` form.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// One calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// - Returns `ModelError::InvalidDate` for non-canonical shapes
    ///   (`2024-5-5`, surrounding whitespace) and impossible days
    ///   (`2023-02-29`).
    pub fn parse(value: &str) -> ModelResult<Self> {
        if !ISO_DATE_RE.is_match(value) {
            return Err(ModelError::InvalidDate(value.to_string()));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ModelError::InvalidDate(value.to_string()))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> ModelResult<Self> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(ModelError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ModelError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Local calendar date of the running process.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the date `days` later (or earlier when negative).
    pub fn offset_days(self, days: i64) -> Option<Self> {
        let step = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(step)
        } else {
            self.0.checked_sub_days(step)
        };
        shifted.map(Self)
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

/// A calendar month, used as the unit of navigation and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
    last: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> ModelResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ModelError::InvalidMonth(month));
        }
        let out_of_range = || ModelError::MonthOutOfRange {
            year: i64::from(year),
            month,
        };
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(out_of_range());
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let last = first
            .with_day(days_in_month(year, month))
            .ok_or_else(out_of_range)?;
        Ok(Self { first, last })
    }

    /// Month containing `date`.
    pub fn of(date: IsoDate) -> Self {
        let first = date.0.with_day(1).unwrap_or(date.0);
        let last = date
            .0
            .with_day(days_in_month(date.year(), date.month()))
            .unwrap_or(date.0);
        Self { first, last }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> IsoDate {
        IsoDate(self.first)
    }

    pub fn last_day(self) -> IsoDate {
        IsoDate(self.last)
    }

    /// Shifts by `delta` whole months; year boundaries roll over both ways.
    ///
    /// # Errors
    /// - Returns `ModelError::MonthOutOfRange` when the target month cannot
    ///   be represented.
    pub fn add_months(self, delta: i32) -> ModelResult<Self> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month()) - 1 + i64::from(delta);
        let year = index.div_euclid(12);
        let month = u32::try_from(index.rem_euclid(12) + 1).unwrap_or(1);
        let year = i32::try_from(year).map_err(|_| ModelError::MonthOutOfRange { year, month })?;
        Self::new(year, month)
    }

    pub fn contains(self, date: IsoDate) -> bool {
        date.0 >= self.first && date.0 <= self.last
    }

    /// `YYYY-MM` prefix shared by every date string in this month.
    pub fn prefix(self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix())
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::{IsoDate, YearMonth};
    use crate::model::ModelError;
    use chrono::Weekday;

    #[test]
    fn parse_accepts_canonical_dates_only() {
        let date = IsoDate::parse("2024-05-05").expect("canonical date should parse");
        assert_eq!(date.to_string(), "2024-05-05");
        assert_eq!(date.weekday(), Weekday::Sun);

        for bad in ["2024-5-5", " 2024-05-05", "2023-02-29", "2024/05/05", ""] {
            assert!(
                matches!(IsoDate::parse(bad), Err(ModelError::InvalidDate(_))),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn leap_february_has_twenty_nine_days() {
        let month = YearMonth::new(2024, 2).unwrap();
        assert_eq!(month.last_day().to_string(), "2024-02-29");
        let month = YearMonth::new(2023, 2).unwrap();
        assert_eq!(month.last_day().to_string(), "2023-02-28");
    }

    #[test]
    fn add_months_rolls_over_years_in_both_directions() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.add_months(-1).unwrap(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(january.add_months(13).unwrap(), YearMonth::new(2025, 2).unwrap());
        assert_eq!(january.add_months(-25).unwrap(), YearMonth::new(2021, 12).unwrap());
        assert_eq!(january.add_months(0).unwrap(), january);
    }

    #[test]
    fn add_months_reports_out_of_range() {
        let month = YearMonth::new(2024, 1).unwrap();
        assert!(matches!(
            month.add_months(i32::MAX),
            Err(ModelError::MonthOutOfRange { .. })
        ));
    }

    #[test]
    fn years_beyond_four_digits_are_rejected() {
        assert!(matches!(
            YearMonth::new(10_000, 1),
            Err(ModelError::MonthOutOfRange { .. })
        ));
        assert!(IsoDate::from_ymd(10_000, 1, 1).is_err());
        let december = YearMonth::new(9999, 12).unwrap();
        assert!(december.add_months(1).is_err());
    }

    #[test]
    fn new_rejects_month_zero_and_thirteen() {
        assert_eq!(YearMonth::new(2024, 0), Err(ModelError::InvalidMonth(0)));
        assert_eq!(YearMonth::new(2024, 13), Err(ModelError::InvalidMonth(13)));
    }

    #[test]
    fn of_and_contains_agree() {
        let date = IsoDate::parse("2024-04-30").unwrap();
        let month = YearMonth::of(date);
        assert_eq!(month.prefix(), "2024-04");
        assert!(month.contains(date));
        assert!(!month.contains(IsoDate::parse("2024-05-01").unwrap()));
    }
}
