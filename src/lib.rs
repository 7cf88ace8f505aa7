mod consts;
mod month;
mod prelude;
mod types;

pub use consts::*;
pub use types::{days_in_month, is_leap_year};
pub use types::{Day, InvalidWeekday, Month, Weekday, Year};

use crate::prelude::*;
use std::str::FromStr;

/// A concrete calendar date in the proleptic Gregorian calendar.
///
/// Immutable by value: every operation derives a new date and leaves its
/// input untouched. A `CalendarDate` is always a real date — the component
/// types validate on construction and the month-end arithmetic only
/// produces days that exist in the target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year: types::Year,
    month: types::Month,
    day: types::Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from its numeric components, validating each one.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `InvalidMonth`, or `InvalidDay`
    /// if a component is out of range for the proleptic Gregorian calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year_t = types::Year::new(year)?;
        let month_t = types::Month::new(month)?;
        let day_t = types::Day::new(day, year, month)?;
        Ok(Self {
            year: year_t,
            month: month_t,
            day: day_t,
        })
    }

    /// Returns the year (1..=9999)
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of the month (1..=31)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> types::Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> types::Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> types::Day {
        self.day
    }

    /// Returns the date as a (year, month, day) tuple
    pub const fn to_ymd(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// Same year and month with the day replaced. The caller must have
    /// proven `day` valid for this year and month.
    pub(crate) fn with_day(self, day: u8) -> Self {
        Self {
            day: types::Day::from_valid(day),
            ..self
        }
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Strictly enforce delimiters: DATE_SEPARATOR for ISO, MONTH_FIRST_SEPARATOR for month-first
        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        if has_hyphen && has_slash {
            return Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({} and {})",
                DATE_SEPARATOR, MONTH_FIRST_SEPARATOR
            )));
        }

        if has_hyphen {
            // ISO format: YYYY-MM-DD
            let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
            Self::parse_iso_date(&parts)
        } else if has_slash {
            // Month-first format: MM/DD/YYYY
            let parts: Vec<&str> = trimmed
                .split(MONTH_FIRST_SEPARATOR)
                .map(str::trim)
                .collect();
            Self::parse_month_first_date(&parts)
        } else {
            Err(ParseError::InvalidFormat(format!(
                "Expected YYYY-MM-DD or MM/DD/YYYY: {trimmed}"
            )))
        }
    }
}

impl CalendarDate {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_iso_date(parts: &[&str]) -> Result<Self, ParseError> {
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{sep}MM{sep}DD, found {} separators",
                parts.len() - 1,
                sep = DATE_SEPARATOR,
            )));
        }
        // Parse components - InvalidFormat if not numeric
        let year = Self::parse_u16(parts[0])?;
        let month = Self::parse_u8(parts[1])?;
        let day = Self::parse_u8(parts[2])?;

        Self::new(year, month, day)
    }

    fn parse_month_first_date(parts: &[&str]) -> Result<Self, ParseError> {
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected MM{sep}DD{sep}YYYY, found {} separators",
                parts.len() - 1,
                sep = MONTH_FIRST_SEPARATOR,
            )));
        }
        // Parse components - InvalidFormat if not numeric
        let month = Self::parse_u8(parts[0])?;
        let day = Self::parse_u8(parts[1])?;
        let year = Self::parse_u16(parts[2])?;

        Self::new(year, month, day)
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
