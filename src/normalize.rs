//! Reduction of raw constructor inputs into the canonical delta fields.
//!
//! Relative fields carry from the smallest unit upward
//! (µs → s → min → h → days, months → years). Days and years absorb
//! carries but are never reduced themselves, so a day is never treated as a
//! fixed fraction of a month.
//!
//! Absolute fields are clamped independently: anything at or above the
//! field's lower bound is clamped down to its maximum, anything below is
//! unset.

use crate::DeltaConfig;
use crate::consts::{
    DAYS_PER_WEEK, HOURS_PER_DAY, MAX_HOUR, MAX_MICROSECOND, MAX_MINUTE, MAX_SECOND,
    MICROS_PER_MILLI, MICROS_PER_SECOND, MINUTES_PER_HOUR, MONTHS_PER_YEAR, SECONDS_PER_MINUTE,
};
use crate::types::{Day, Month, Weekday, Year};

/// Splits `value` into `(carry, remainder)` for a unit with `base` steps.
///
/// Rust's `/` and `%` truncate toward zero, so both parts keep the sign of
/// `value`: `-65` seconds is `(-1, -5)`, never `(-2, 55)`.
#[inline]
const fn carry(value: i64, base: i64) -> (i64, i64) {
    (value / base, value % base)
}

/// The seven relative fields of a delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct Relative {
    pub years:        i64,
    pub months:       i64,
    pub days:         i64,
    pub hours:        i64,
    pub minutes:      i64,
    pub seconds:      i64,
    pub microseconds: i64,
}

impl Relative {
    /// Folds weeks into days and milliseconds into microseconds. The result
    /// still needs [`Relative::normalized`].
    pub fn from_config(config: &DeltaConfig) -> Self {
        Self {
            years:        config.years,
            months:       config.months,
            days:         config
                .days
                .saturating_add(config.weeks.saturating_mul(DAYS_PER_WEEK)),
            hours:        config.hours,
            minutes:      config.minutes,
            seconds:      config.seconds,
            microseconds: config
                .microseconds
                .saturating_add(config.milliseconds.saturating_mul(MICROS_PER_MILLI)),
        }
    }

    /// Carries every out-of-range unit into the next larger one.
    pub const fn normalized(self) -> Self {
        let (carried, microseconds) = carry(self.microseconds, MICROS_PER_SECOND);
        let seconds = self.seconds.saturating_add(carried);

        let (carried, seconds) = carry(seconds, SECONDS_PER_MINUTE);
        let minutes = self.minutes.saturating_add(carried);

        let (carried, minutes) = carry(minutes, MINUTES_PER_HOUR);
        let hours = self.hours.saturating_add(carried);

        let (carried, hours) = carry(hours, HOURS_PER_DAY);
        let days = self.days.saturating_add(carried);

        let (carried, months) = carry(self.months, MONTHS_PER_YEAR);
        let years = self.years.saturating_add(carried);

        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
        }
    }

    /// Applies `f` to every field.
    pub fn map(self, f: impl Fn(i64) -> i64) -> Self {
        Self {
            years:        f(self.years),
            months:       f(self.months),
            days:         f(self.days),
            hours:        f(self.hours),
            minutes:      f(self.minutes),
            seconds:      f(self.seconds),
            microseconds: f(self.microseconds),
        }
    }

    /// Combines two deltas field by field.
    pub fn zip(self, other: Self, f: impl Fn(i64, i64) -> i64) -> Self {
        Self {
            years:        f(self.years, other.years),
            months:       f(self.months, other.months),
            days:         f(self.days, other.days),
            hours:        f(self.hours, other.hours),
            minutes:      f(self.minutes, other.minutes),
            seconds:      f(self.seconds, other.seconds),
            microseconds: f(self.microseconds, other.microseconds),
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.microseconds == 0
    }
}

/// The eight absolute fields of a delta; `None` means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct Absolute {
    pub year:        Option<Year>,
    pub month:       Option<Month>,
    pub day:         Option<Day>,
    pub weekday:     Option<Weekday>,
    pub hour:        Option<u8>,
    pub minute:      Option<u8>,
    pub second:      Option<u8>,
    pub microsecond: Option<u32>,
}

impl Absolute {
    pub fn from_config(config: &DeltaConfig) -> Self {
        Self {
            year:        config.year.and_then(Year::clamped),
            month:       config.month.and_then(Month::clamped),
            day:         config.day.and_then(Day::clamped),
            weekday:     config.weekday.and_then(Weekday::clamped),
            hour:        clamp_zero_based(config.hour, MAX_HOUR),
            minute:      clamp_zero_based(config.minute, MAX_MINUTE),
            second:      clamp_zero_based(config.second, MAX_SECOND),
            microsecond: combine_ms_us(config.millisecond, config.microsecond),
        }
    }

    /// Field by field: `self` where set, `fallback` otherwise.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            year:        self.year.or(fallback.year),
            month:       self.month.or(fallback.month),
            day:         self.day.or(fallback.day),
            weekday:     self.weekday.or(fallback.weekday),
            hour:        self.hour.or(fallback.hour),
            minute:      self.minute.or(fallback.minute),
            second:      self.second.or(fallback.second),
            microsecond: self.microsecond.or(fallback.microsecond),
        }
    }

    pub const fn is_unset(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.weekday.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.second.is_none()
            && self.microsecond.is_none()
    }
}

fn clamp_zero_based(value: Option<i64>, max: u8) -> Option<u8> {
    let value = value.filter(|v| *v >= 0)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.min(i64::from(max)) as u8;
    Some(clamped)
}

/// Absolute sub-second value from a millisecond and a microsecond input.
/// Each input contributes only when set (`>= 0`); unset when neither is.
fn combine_ms_us(millisecond: Option<i64>, microsecond: Option<i64>) -> Option<u32> {
    let millisecond = millisecond.filter(|v| *v >= 0);
    let microsecond = microsecond.filter(|v| *v >= 0);
    if millisecond.is_none() && microsecond.is_none() {
        return None;
    }
    let total = millisecond
        .unwrap_or(0)
        .saturating_mul(MICROS_PER_MILLI)
        .saturating_add(microsecond.unwrap_or(0));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = total.min(i64::from(MAX_MICROSECOND)) as u32;
    Some(clamped)
}
