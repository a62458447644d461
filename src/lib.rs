mod apply;
mod combine;
mod compare;
mod config;
mod consts;
mod error;
mod interop;
mod normalize;
mod operand;
mod prelude;
mod scalar;
mod types;

pub use config::DeltaConfig;
pub use consts::*;
pub use error::{DateError, DeltaError, Operation};
pub use interop::{
    Date, DateTime, ForeignDelta, NOT_A_TIME, NthWeekday, PlainDuration, RawValue, TimeUnit,
    Timestamp, TzInfo,
};
pub use operand::{Operand, Outcome};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};

use crate::normalize::{Absolute, Relative};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A combined relative and absolute offset over calendar timestamps.
///
/// Relative fields (`years` through `microseconds`) are added to a
/// timestamp. Absolute fields (`year` through `microsecond`, plus `weekday`)
/// replace the timestamp's own field when set. Values are immutable: every
/// operation returns a new delta.
///
/// Construction normalizes once. Afterwards `months` is within `-11..=11`,
/// `hours` within `-23..=23`, `minutes` and `seconds` within `-59..=59` and
/// `microseconds` within `-999_999..=999_999`, each keeping the sign of its
/// input. `days` and `years` are never reduced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "DeltaConfig", into = "DeltaConfig")]
pub struct CalendarDelta {
    relative: Relative,
    absolute: Absolute,
    hashcode: u64,
}

impl CalendarDelta {
    /// Builds a delta from raw, possibly out-of-range options.
    pub fn new(config: DeltaConfig) -> Self {
        Self::from_parts(
            Relative::from_config(&config),
            Absolute::from_config(&config),
        )
    }

    /// The empty delta: no offset, no absolute fields.
    pub fn zero() -> Self {
        Self::from_parts(Relative::default(), Absolute::default())
    }

    pub(crate) fn from_parts(relative: Relative, absolute: Absolute) -> Self {
        let relative = relative.normalized();
        Self {
            relative,
            absolute,
            hashcode: compare::hash_fields(&relative, &absolute),
        }
    }

    pub(crate) const fn relative(&self) -> Relative {
        self.relative
    }

    pub(crate) const fn absolute_fields(&self) -> Absolute {
        self.absolute
    }

    /// Same absolute fields, new relative fields.
    pub(crate) fn with_relative(&self, relative: Relative) -> Self {
        Self::from_parts(relative, self.absolute)
    }

    pub const fn years(&self) -> i64 {
        self.relative.years
    }

    pub const fn months(&self) -> i64 {
        self.relative.months
    }

    pub const fn days(&self) -> i64 {
        self.relative.days
    }

    /// Whole weeks in `days`, truncated toward zero.
    pub const fn weeks(&self) -> i64 {
        self.relative.days / 7
    }

    pub const fn hours(&self) -> i64 {
        self.relative.hours
    }

    pub const fn minutes(&self) -> i64 {
        self.relative.minutes
    }

    pub const fn seconds(&self) -> i64 {
        self.relative.seconds
    }

    /// Whole milliseconds in `microseconds`, truncated toward zero.
    pub const fn milliseconds(&self) -> i64 {
        self.relative.microseconds / 1_000
    }

    pub const fn microseconds(&self) -> i64 {
        self.relative.microseconds
    }

    pub fn year(&self) -> Option<u16> {
        self.absolute.year.map(Year::get)
    }

    pub fn month(&self) -> Option<u8> {
        self.absolute.month.map(Month::get)
    }

    pub fn day(&self) -> Option<u8> {
        self.absolute.day.map(Day::get)
    }

    pub const fn weekday(&self) -> Option<Weekday> {
        self.absolute.weekday
    }

    pub const fn hour(&self) -> Option<u8> {
        self.absolute.hour
    }

    pub const fn minute(&self) -> Option<u8> {
        self.absolute.minute
    }

    pub const fn second(&self) -> Option<u8> {
        self.absolute.second
    }

    /// Absolute millisecond part of the absolute `microsecond`.
    pub fn millisecond(&self) -> Option<u32> {
        self.absolute.microsecond.map(|us| us / 1_000)
    }

    pub const fn microsecond(&self) -> Option<u32> {
        self.absolute.microsecond
    }

    /// True when every relative field is zero and no absolute field is set.
    pub const fn is_empty(&self) -> bool {
        self.relative.is_zero() && self.absolute.is_unset()
    }
}

impl Default for CalendarDelta {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<DeltaConfig> for CalendarDelta {
    fn from(config: DeltaConfig) -> Self {
        Self::new(config)
    }
}

impl From<CalendarDelta> for DeltaConfig {
    fn from(delta: CalendarDelta) -> Self {
        let Relative {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
        } = delta.relative;
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
            year: delta.year().map(i64::from),
            month: delta.month().map(i64::from),
            day: delta.day().map(i64::from),
            weekday: delta.weekday().map(|w| i64::from(w.index())),
            hour: delta.hour().map(i64::from),
            minute: delta.minute().map(i64::from),
            second: delta.second().map(i64::from),
            microsecond: delta.microsecond().map(i64::from),
            ..Self::default()
        }
    }
}

impl From<PlainDuration> for CalendarDelta {
    fn from(duration: PlainDuration) -> Self {
        Self::new(DeltaConfig {
            days: duration.days(),
            seconds: duration.seconds(),
            microseconds: duration.microseconds(),
            ..DeltaConfig::default()
        })
    }
}

impl TryFrom<&ForeignDelta> for CalendarDelta {
    type Error = DeltaError;

    fn try_from(foreign: &ForeignDelta) -> Result<Self, Self::Error> {
        foreign.to_config().map(Self::new)
    }
}

impl fmt::Display for CalendarDelta {
    /// Lists non-zero relative fields, then set absolute fields:
    /// `CalendarDelta(months=1, days=-2, weekday=FR, hour=9)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relative = [
            ("years", self.years()),
            ("months", self.months()),
            ("days", self.days()),
            ("hours", self.hours()),
            ("minutes", self.minutes()),
            ("seconds", self.seconds()),
            ("microseconds", self.microseconds()),
        ];
        let absolute = [
            ("year", self.year().map(u32::from)),
            ("month", self.month().map(u32::from)),
            ("day", self.day().map(u32::from)),
            ("hour", self.hour().map(u32::from)),
            ("minute", self.minute().map(u32::from)),
            ("second", self.second().map(u32::from)),
            ("microsecond", self.microsecond()),
        ];

        let mut parts: Vec<String> = relative
            .iter()
            .filter(|(_, value)| *value != 0)
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        let (dates, times) = absolute.split_at(3);
        parts.extend(
            dates
                .iter()
                .filter_map(|(name, value)| value.map(|v| format!("{name}={v}"))),
        );
        if let Some(weekday) = self.weekday() {
            parts.push(format!("weekday={weekday}"));
        }
        parts.extend(
            times
                .iter()
                .filter_map(|(name, value)| value.map(|v| format!("{name}={v}"))),
        );

        write!(f, "CalendarDelta({})", parts.join(", "))
    }
}
