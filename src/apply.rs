//! Shifting timestamps by a delta.
//!
//! The calendar part is resolved first: absolute year and month replace the
//! base, the relative years and months are added, the year is clamped to
//! 1..=9999 and the day is clamped to the resulting month's length. Absolute
//! time fields replace the base's time, then the exact part (days, hours,
//! minutes, seconds, microseconds) is added as elapsed time. An absolute
//! weekday finally moves the date forward to the next matching day, which
//! may be the same day.
//!
//! Subtracting negates only the relative parts; absolute fields and the
//! forward-only weekday rule are identical in both directions.

use crate::consts::{
    MAX_YEAR, MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND, MIN_YEAR,
    MONTHS_PER_YEAR,
};
use crate::interop::{Date, DateTime, Timestamp};
use crate::types::{Day, Month, Year, days_in_month};
use crate::{CalendarDelta, DeltaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

impl CalendarDelta {
    /// `timestamp + self`. A date-only base starts at midnight with no
    /// timezone; a date-time base keeps its timezone and fold.
    ///
    /// # Errors
    /// `OutOfRange` when the exact offset or the weekday step leaves years
    /// 1..=9999. The calendar part alone never fails: the year is clamped.
    pub fn apply_to(&self, timestamp: impl Into<Timestamp>) -> Result<DateTime, DeltaError> {
        self.shift(&timestamp.into(), Direction::Forward)
    }

    /// `timestamp - self`.
    ///
    /// # Errors
    /// As [`CalendarDelta::apply_to`].
    pub fn subtract_from(&self, timestamp: impl Into<Timestamp>) -> Result<DateTime, DeltaError> {
        self.shift(&timestamp.into(), Direction::Backward)
    }

    fn shift(&self, base: &Timestamp, direction: Direction) -> Result<DateTime, DeltaError> {
        let sign = direction.sign();
        let relative = self.relative();
        let absolute = self.absolute_fields();
        let date = base.date();

        let mut year = i64::from(absolute.year.map_or(date.year(), Year::get))
            .saturating_add(relative.years.saturating_mul(sign));
        let mut month = i64::from(absolute.month.map_or(date.month(), Month::get));
        // |months| < 12 after normalization, so one wrap is enough
        month += relative.months * sign;
        if month > MONTHS_PER_YEAR {
            year = year.saturating_add(1);
            month -= MONTHS_PER_YEAR;
        } else if month < 1 {
            year = year.saturating_sub(1);
            month += MONTHS_PER_YEAR;
        }

        let year = year.clamp(i64::from(MIN_YEAR), i64::from(MAX_YEAR));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (year_u16, month_u8) = (year as u16, month as u8);
        let day = absolute
            .day
            .map_or(date.day(), Day::get)
            .min(days_in_month(year_u16, month_u8));
        let date = Date::new(year, month, i64::from(day))?;

        let candidate = match base {
            Timestamp::Date(_) => DateTime::new(
                date,
                absolute.hour.map_or(0, i64::from),
                absolute.minute.map_or(0, i64::from),
                absolute.second.map_or(0, i64::from),
                absolute.microsecond.map_or(0, i64::from),
            )?,
            Timestamp::DateTime(base) => {
                let moved = DateTime::new(
                    date,
                    i64::from(absolute.hour.unwrap_or(base.hour())),
                    i64::from(absolute.minute.unwrap_or(base.minute())),
                    i64::from(absolute.second.unwrap_or(base.second())),
                    i64::from(absolute.microsecond.unwrap_or(base.microsecond())),
                )?
                .with_fold(base.fold())?;
                match base.tz() {
                    Some(tz) => moved.with_tz(tz.clone()),
                    None => moved,
                }
            }
        };

        let offset = i128::from(relative.days) * i128::from(MICROS_PER_DAY)
            + i128::from(relative.hours) * i128::from(MICROS_PER_HOUR)
            + i128::from(relative.minutes) * i128::from(MICROS_PER_MINUTE)
            + i128::from(relative.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(relative.microseconds);
        let shifted = if offset == 0 {
            candidate
        } else {
            let micros = candidate.to_epoch_micros() + offset * i128::from(sign);
            candidate
                .at_epoch_micros(micros)
                .inspect_err(|_| tracing::debug!(%candidate, %offset, "exact offset out of range"))?
        };

        let Some(weekday) = absolute.weekday else {
            return Ok(shifted);
        };
        let ahead = shifted.weekday().days_until(weekday);
        if ahead == 0 {
            return Ok(shifted);
        }
        let micros = shifted.to_epoch_micros() + i128::from(ahead) * i128::from(MICROS_PER_DAY);
        shifted
            .at_epoch_micros(micros)
            .inspect_err(|_| tracing::debug!(%shifted, %weekday, "weekday step out of range"))
    }
}
