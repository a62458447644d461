use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_DAY, MAX_MONTH, MAX_WEEKDAY, MAX_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is outside `1..=MAX_YEAR`.
    pub fn new(value: i64) -> Result<Self, DateError> {
        let year = u16::try_from(value)
            .ok()
            .filter(|y| *y <= MAX_YEAR)
            .and_then(NonZeroU16::new)
            .ok_or(DateError::InvalidYear(value))?;
        Ok(Self(year))
    }

    /// Absolute-field normalization: positive values clamp down to
    /// `MAX_YEAR`, anything else is unset.
    pub fn clamped(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        // value is in 1..=MAX_YEAR after the min
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let year = value.min(i64::from(MAX_YEAR)) as u16;
        NonZeroU16::new(year).map(Self)
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is outside `1..=MAX_MONTH`.
    pub fn new(value: i64) -> Result<Self, DateError> {
        let month = u8::try_from(value)
            .ok()
            .filter(|m| *m <= MAX_MONTH)
            .and_then(NonZeroU8::new)
            .ok_or(DateError::InvalidMonth(value))?;
        Ok(Self(month))
    }

    /// Positive values clamp down to December, anything else is unset.
    pub fn clamped(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let month = value.min(i64::from(MAX_MONTH)) as u8;
        NonZeroU8::new(month).map(Self)
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day-of-month value in `1..=31`.
///
/// As an absolute delta field a day is not tied to a month; it only gets
/// clamped to the real month length when the delta is applied. `Day::new`
/// validates against a concrete year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: i64, year: u16, month: u8) -> Result<Self, DateError> {
        let invalid = DateError::InvalidDay {
            year,
            month,
            day: value,
        };
        let day = u8::try_from(value)
            .ok()
            .filter(|d| *d <= days_in_month(year, month))
            .and_then(NonZeroU8::new)
            .ok_or(invalid)?;
        Ok(Self(day))
    }

    /// Positive values clamp down to 31, anything else is unset.
    pub fn clamped(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let day = value.min(i64::from(MAX_DAY)) as u8;
        NonZeroU8::new(day).map(Self)
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // No month context here, so only the 1..=31 window is checked
        NonZeroU8::new(value)
            .filter(|d| d.get() <= MAX_DAY)
            .map(Self)
            .ok_or(DateError::InvalidDay {
                year: 0,
                month: 0,
                day: i64::from(value),
            })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Day of the week, Monday first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum Weekday {
    #[display(fmt = "MO")]
    #[serde(rename = "MO")]
    Monday,
    #[display(fmt = "TU")]
    #[serde(rename = "TU")]
    Tuesday,
    #[display(fmt = "WE")]
    #[serde(rename = "WE")]
    Wednesday,
    #[display(fmt = "TH")]
    #[serde(rename = "TH")]
    Thursday,
    #[display(fmt = "FR")]
    #[serde(rename = "FR")]
    Friday,
    #[display(fmt = "SA")]
    #[serde(rename = "SA")]
    Saturday,
    #[display(fmt = "SU")]
    #[serde(rename = "SU")]
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday for a zero-based index (Monday = 0). Returns `None` past Sunday.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Absolute-field normalization: negative values are unset, values past
    /// Sunday clamp to Sunday.
    pub fn clamped(value: i64) -> Option<Self> {
        if value < 0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = value.min(i64::from(MAX_WEEKDAY)) as u8;
        Self::from_index(index)
    }

    /// Zero-based index, Monday = 0
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Number of days (0..=6) to move forward from `self` to reach `target`.
    pub const fn days_until(self, target: Self) -> u8 {
        (target.index() + 7 - self.index()) % 7
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
