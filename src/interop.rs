//! Values a delta interoperates with: plain elapsed durations, calendar
//! timestamps, relativedelta-shaped foreign deltas and raw numeric time
//! values.
//!
//! These are small self-contained types so the engine never depends on the
//! internal representation of a particular date/time library. Conversions
//! from other libraries go through their public fields.

use std::fmt;
use std::sync::Arc;

use crate::consts::{
    MAX_HOUR, MAX_MICROSECOND, MAX_MINUTE, MAX_SECOND, MICROS_PER_DAY, MICROS_PER_HOUR,
    MICROS_PER_MILLI, MICROS_PER_MINUTE, MICROS_PER_SECOND, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::prelude::*;
use crate::types::{Day, Month, Weekday, Year, days_in_month};
use crate::{DateError, DeltaConfig, DeltaError};

/// Weekday of 1970-01-01 (Thursday), Monday = 0
const EPOCH_WEEKDAY: i64 = 3;
/// Days from 0000-03-01 to 1970-01-01 in the proleptic Gregorian calendar
const EPOCH_SHIFT: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;
/// 0001-01-01 and 9999-12-31 as days since 1970-01-01
const MIN_EPOCH_DAYS: i64 = days_from_civil(1, 1, 1);
const MAX_EPOCH_DAYS: i64 = days_from_civil(9999, 12, 31);

/// Days since 1970-01-01 for a proleptic Gregorian date.
pub(crate) const fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let year_of_era = year - era * 400;
    let shifted_month = (month as i64 + 9) % 12; // March = 0
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - EPOCH_SHIFT
}

/// Inverse of [`days_from_civil`]: `(year, month, day)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let days = days + EPOCH_SHIFT;
    let era = if days >= 0 { days } else { days - (DAYS_PER_ERA - 1) } / DAYS_PER_ERA;
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month as u8, day as u8)
}

/// An elapsed amount of time with no calendar semantics.
///
/// Stored like a classic `timedelta`: whole `days` (any sign), `seconds` in
/// `0..86_400` and `microseconds` in `0..1_000_000`, normalized with floor
/// division on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDuration {
    days:         i64,
    seconds:      i64,
    microseconds: i64,
}

impl PlainDuration {
    pub const ZERO: Self = Self {
        days:         0,
        seconds:      0,
        microseconds: 0,
    };

    pub fn new(days: i64, seconds: i64, microseconds: i64) -> Self {
        let total = i128::from(days) * i128::from(MICROS_PER_DAY)
            + i128::from(seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(microseconds);
        Self::from_micros(total)
    }

    /// Builds a duration from a total microsecond count. Day counts beyond
    /// the `i64` range saturate.
    pub fn from_micros(total: i128) -> Self {
        let per_day = i128::from(MICROS_PER_DAY);
        let days = i64::try_from(total.div_euclid(per_day)).unwrap_or(if total < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        // rem_euclid keeps the remainder in 0..MICROS_PER_DAY
        #[allow(clippy::cast_possible_truncation)]
        let rest = total.rem_euclid(per_day) as i64;
        Self {
            days,
            seconds: rest / MICROS_PER_SECOND,
            microseconds: rest % MICROS_PER_SECOND,
        }
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub const fn microseconds(&self) -> i64 {
        self.microseconds
    }

    /// Total length in microseconds, counting every day as 24 hours.
    pub fn total_micros(&self) -> i128 {
        i128::from(self.days) * i128::from(MICROS_PER_DAY)
            + i128::from(self.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microseconds)
    }
}

impl fmt::Display for PlainDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / SECONDS_PER_HOUR;
        let minutes = self.seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE;
        let seconds = self.seconds % SECONDS_PER_MINUTE;
        if self.days != 0 {
            let unit = if self.days.abs() == 1 { "day" } else { "days" };
            write!(f, "{} {unit}, ", self.days)?;
        }
        write!(f, "{hours}:{minutes:02}:{seconds:02}")?;
        if self.microseconds != 0 {
            write!(f, ".{:06}", self.microseconds)?;
        }
        Ok(())
    }
}

/// A proleptic Gregorian calendar date in years 1..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
}

impl Date {
    /// # Errors
    /// Returns `DateError` if any component is out of range for the calendar.
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year.get(), month.get())?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn days_in_month(&self) -> u8 {
        days_in_month(self.year.get(), self.month.get())
    }

    pub fn weekday(&self) -> Weekday {
        let index = (self.to_epoch_days() + EPOCH_WEEKDAY).rem_euclid(7);
        // rem_euclid(7) is always a valid index
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index as u8;
        Weekday::from_index(index).unwrap_or(Weekday::Monday)
    }

    pub(crate) const fn to_epoch_days(self) -> i64 {
        days_from_civil(self.year.get() as i64, self.month.get(), self.day.get())
    }

    /// # Errors
    /// Returns `DeltaError::OutOfRange` outside years 1..=9999.
    pub(crate) fn from_epoch_days(days: i64) -> Result<Self, DeltaError> {
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&days) {
            return Err(DeltaError::OutOfRange);
        }
        let (year, month, day) = civil_from_days(days);
        let year = Year::new(year).map_err(|_| DeltaError::OutOfRange)?;
        Ok(Self {
            year,
            month: Month::new(i64::from(month))?,
            day: Day::new(i64::from(day), year.get(), month)?,
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// An opaque timezone label, carried through arithmetic untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{_0}")]
pub struct TzInfo(Arc<str>);

impl TzInfo {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A date with a time of day, an optional timezone and a fold flag
/// disambiguating repeated wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    date:        Date,
    hour:        u8,
    minute:      u8,
    second:      u8,
    microsecond: u32,
    tz:          Option<TzInfo>,
    fold:        u8,
}

impl DateTime {
    /// # Errors
    /// Returns `DateError::InvalidTime` if a time component is out of range.
    pub fn new(
        date: Date,
        hour: i64,
        minute: i64,
        second: i64,
        microsecond: i64,
    ) -> Result<Self, DateError> {
        Ok(Self {
            date,
            hour: time_field("hour", hour, MAX_HOUR)?,
            minute: time_field("minute", minute, MAX_MINUTE)?,
            second: time_field("second", second, MAX_SECOND)?,
            microsecond: u32::try_from(microsecond)
                .ok()
                .filter(|us| *us <= MAX_MICROSECOND)
                .ok_or(DateError::InvalidTime {
                    field: "microsecond",
                    value: microsecond,
                })?,
            tz: None,
            fold: 0,
        })
    }

    /// Midnight at the start of `date`.
    pub const fn midnight(date: Date) -> Self {
        Self {
            date,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            tz: None,
            fold: 0,
        }
    }

    #[must_use]
    pub fn with_tz(self, tz: TzInfo) -> Self {
        Self {
            tz: Some(tz),
            ..self
        }
    }

    /// # Errors
    /// Returns `DateError::InvalidFold` unless `fold` is 0 or 1.
    pub fn with_fold(self, fold: u8) -> Result<Self, DateError> {
        if fold > 1 {
            return Err(DateError::InvalidFold(fold));
        }
        Ok(Self { fold, ..self })
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn year(&self) -> u16 {
        self.date.year()
    }

    pub const fn month(&self) -> u8 {
        self.date.month()
    }

    pub const fn day(&self) -> u8 {
        self.date.day()
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn microsecond(&self) -> u32 {
        self.microsecond
    }

    pub const fn tz(&self) -> Option<&TzInfo> {
        self.tz.as_ref()
    }

    pub const fn fold(&self) -> u8 {
        self.fold
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Wall-clock microseconds since 1970-01-01T00:00:00, ignoring the timezone.
    pub(crate) fn to_epoch_micros(&self) -> i128 {
        i128::from(self.date.to_epoch_days()) * i128::from(MICROS_PER_DAY)
            + i128::from(self.hour) * i128::from(MICROS_PER_HOUR)
            + i128::from(self.minute) * i128::from(MICROS_PER_MINUTE)
            + i128::from(self.second) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microsecond)
    }

    /// Same timezone and fold, moved to the given wall-clock instant.
    ///
    /// # Errors
    /// Returns `DeltaError::OutOfRange` outside years 1..=9999.
    pub(crate) fn at_epoch_micros(&self, micros: i128) -> Result<Self, DeltaError> {
        Self::from_epoch_micros(micros, self.tz.clone(), self.fold)
    }

    pub(crate) fn from_epoch_micros(
        micros: i128,
        tz: Option<TzInfo>,
        fold: u8,
    ) -> Result<Self, DeltaError> {
        let per_day = i128::from(MICROS_PER_DAY);
        let days = i64::try_from(micros.div_euclid(per_day)).map_err(|_| DeltaError::OutOfRange)?;
        // rem_euclid keeps the remainder in 0..MICROS_PER_DAY
        #[allow(clippy::cast_possible_truncation)]
        let rest = micros.rem_euclid(per_day) as i64;
        let seconds = rest / MICROS_PER_SECOND;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (hour, minute, second, microsecond) = (
            (seconds / SECONDS_PER_HOUR) as u8,
            (seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            (seconds % SECONDS_PER_MINUTE) as u8,
            (rest % MICROS_PER_SECOND) as u32,
        );
        Ok(Self {
            date: Date::from_epoch_days(days)?,
            hour,
            minute,
            second,
            microsecond,
            tz,
            fold,
        })
    }
}

fn time_field(field: &'static str, value: i64, max: u8) -> Result<u8, DateError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(DateError::InvalidTime { field, value })
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}:{:02}",
            self.date, self.hour, self.minute, self.second
        )?;
        if self.microsecond != 0 {
            write!(f, ".{:06}", self.microsecond)?;
        }
        if let Some(tz) = &self.tz {
            write!(f, "[{tz}]")?;
        }
        Ok(())
    }
}

/// A concrete calendar timestamp a delta can be applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From)]
pub enum Timestamp {
    /// Date only; applying a delta yields midnight-based date-times.
    Date(Date),
    DateTime(DateTime),
}

impl Timestamp {
    pub const fn date(&self) -> Date {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(datetime) => datetime.date(),
        }
    }
}

/// An n-th weekday marker as used by relativedelta-style libraries,
/// e.g. "second Tuesday" (`n = 2`) or "last Friday" (`n = -1`).
/// `n = 0` means "the next matching weekday" with no occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthWeekday {
    pub weekday: Weekday,
    pub n:       i32,
}

impl NthWeekday {
    pub const fn any(weekday: Weekday) -> Self {
        Self { weekday, n: 0 }
    }
}

/// A relativedelta-shaped delta from another library, read through its
/// public fields. Absolute fields are raw and unclamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ForeignDelta {
    pub years:        i64,
    pub months:       i64,
    pub days:         i64,
    pub hours:        i64,
    pub minutes:      i64,
    pub seconds:      i64,
    pub microseconds: i64,
    pub year:         Option<i64>,
    pub month:        Option<i64>,
    pub day:          Option<i64>,
    pub weekday:      Option<NthWeekday>,
    pub hour:         Option<i64>,
    pub minute:       Option<i64>,
    pub second:       Option<i64>,
    pub microsecond:  Option<i64>,
}

impl ForeignDelta {
    /// Maps the foreign fields onto construction options.
    ///
    /// # Errors
    /// Returns `DeltaError::NthWeekday` when the weekday carries a non-zero
    /// occurrence count, which a calendar delta cannot express.
    pub fn to_config(&self) -> Result<DeltaConfig, DeltaError> {
        let weekday = match self.weekday {
            Some(NthWeekday { n, .. }) if n != 0 => return Err(DeltaError::NthWeekday { n }),
            Some(NthWeekday { weekday, .. }) => Some(i64::from(weekday.index())),
            None => None,
        };
        Ok(DeltaConfig {
            years: self.years,
            months: self.months,
            days: self.days,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            microseconds: self.microseconds,
            year: self.year,
            month: self.month,
            day: self.day,
            weekday,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            microsecond: self.microsecond,
            ..DeltaConfig::default()
        })
    }
}

/// Resolution of a raw numeric time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TimeUnit {
    #[display(fmt = "D")]
    Days,
    #[display(fmt = "h")]
    Hours,
    #[display(fmt = "m")]
    Minutes,
    #[display(fmt = "s")]
    Seconds,
    #[display(fmt = "ms")]
    Milliseconds,
    #[display(fmt = "us")]
    Microseconds,
    #[display(fmt = "ns")]
    Nanoseconds,
}

impl TimeUnit {
    /// `value` of this unit in microseconds. Nanoseconds floor.
    pub fn to_micros(self, value: i64) -> i128 {
        let value = i128::from(value);
        match self {
            Self::Days => value * i128::from(MICROS_PER_DAY),
            Self::Hours => value * i128::from(MICROS_PER_HOUR),
            Self::Minutes => value * i128::from(MICROS_PER_MINUTE),
            Self::Seconds => value * i128::from(MICROS_PER_SECOND),
            Self::Milliseconds => value * i128::from(MICROS_PER_MILLI),
            Self::Microseconds => value,
            Self::Nanoseconds => value.div_euclid(1_000),
        }
    }
}

/// Sentinel count for "not a time" in raw values.
pub const NOT_A_TIME: i64 = i64::MIN;

/// Raw numeric time values, as produced by array libraries: a count of
/// `unit` since 1970-01-01 (`DateTime64`) or a plain count (`TimeDelta64`).
/// They are only accepted through last-resort coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RawValue {
    #[display(fmt = "datetime64({value}, {unit})")]
    DateTime64 { value: i64, unit: TimeUnit },
    #[display(fmt = "timedelta64({value}, {unit})")]
    TimeDelta64 { value: i64, unit: TimeUnit },
}

impl RawValue {
    /// Naive date-time for a `DateTime64`. `None` for `TimeDelta64`,
    /// "not a time", or anything outside years 1..=9999.
    pub fn to_datetime(self) -> Option<DateTime> {
        match self {
            Self::DateTime64 { value, unit } if value != NOT_A_TIME => {
                DateTime::from_epoch_micros(unit.to_micros(value), None, 0).ok()
            }
            Self::DateTime64 { .. } | Self::TimeDelta64 { .. } => None,
        }
    }

    /// Duration for a `TimeDelta64`. `None` for `DateTime64` or "not a time".
    pub fn to_duration(self) -> Option<PlainDuration> {
        match self {
            Self::TimeDelta64 { value, unit } if value != NOT_A_TIME => {
                Some(PlainDuration::from_micros(unit.to_micros(value)))
            }
            Self::DateTime64 { .. } | Self::TimeDelta64 { .. } => None,
        }
    }
}
