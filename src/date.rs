use crate::consts::{MAX_YEAR, MIN_YEAR};
use crate::{DateError, DateFormat, Result, format};
use chrono::{Datelike, Local, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

/// A real Gregorian date between years 1 and 9999.
///
/// Construction validates the year, the month and the day against the length
/// of that month, so overflowing input such as February 30th is rejected
/// rather than rolled into the next month. Values are immutable; every change
/// produces a new date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its numeric components.
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay` when the
    /// components do not name a real date in the supported range.
    pub fn new(year: u32, month: u32, day: u32) -> Result<Self> {
        if !(u32::from(MIN_YEAR)..=u32::from(MAX_YEAR)).contains(&year) {
            return Err(DateError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        let invalid_day = DateError::InvalidDay { year, month, day };
        if day == 0 || day > days_in_month(year, month) {
            return Err(invalid_day);
        }

        let inner = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .ok_or_else(|| invalid_day.clone())?;

        // Round-trip: the stored date must carry exactly the requested components
        if inner.year().unsigned_abs() != year
            || inner.month() != month
            || inner.day() != day
        {
            return Err(invalid_day);
        }
        Ok(Self(inner))
    }

    /// First day of the given month.
    ///
    /// # Errors
    /// Returns an error if the year or month is out of range.
    pub fn first_of_month(year: u32, month: u32) -> Result<Self> {
        Self::new(year, month, 1)
    }

    /// Last day of the given month, leap years honored.
    ///
    /// # Errors
    /// Returns an error if the year or month is out of range.
    pub fn last_of_month(year: u32, month: u32) -> Result<Self> {
        Self::first_of_month(year, month)?;
        Self::new(year, month, days_in_month(year, month))
    }

    /// Today's date on the local clock.
    ///
    /// # Errors
    /// Returns `InvalidYear` if the clock reports a year outside 1-9999.
    pub fn today() -> Result<Self> {
        Self::try_from(Local::now().date_naive())
    }

    pub fn year(&self) -> u32 {
        self.0.year().unsigned_abs()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// (year, month, day) triple.
    pub fn components(&self) -> (u32, u32, u32) {
        (self.year(), self.month(), self.day())
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The following day, or `None` past December 31st, 9999.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(|d| Self::try_from(d).ok())
    }

    /// The previous day, or `None` before January 1st, year 1.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().and_then(|d| Self::try_from(d).ok())
    }

    /// Whether this date falls in `month` of `year`.
    pub fn same_month(&self, year: u32, month: u32) -> bool {
        self.year() == year && self.month() == month
    }

    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self> {
        let year = u32::try_from(value.year()).map_err(|_| {
            DateError::InvalidYear(value.year().unsigned_abs())
        })?;
        Self::new(year, value.month(), value.day())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

/// Parses the ISO `YYYY-MM-DD` form produced by `Display`.
impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        format::parse_date_as(s, DateFormat::Ymd)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Gregorian leap year rule.
pub const fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`; 0 for a month outside 1-12.
pub const fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}
