//! Operand dispatch for delta arithmetic.
//!
//! Every binary operation classifies its other operand in a fixed order:
//! timestamp, plain duration, calendar delta, foreign delta, integer, float
//! and finally raw time values, which are coerced to a timestamp or a
//! duration and dispatched again. Anything else is rejected with
//! [`DeltaError::Unsupported`].

use crate::interop::{Date, DateTime, ForeignDelta, PlainDuration, RawValue, Timestamp};
use crate::prelude::*;
use crate::{CalendarDelta, DeltaError, Operation};

/// The other side of a binary delta operation.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Operand {
    Timestamp(Timestamp),
    Duration(PlainDuration),
    Delta(CalendarDelta),
    Foreign(ForeignDelta),
    Int(i64),
    Float(f64),
    Raw(RawValue),
}

impl Operand {
    /// Short name used in errors and log events.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timestamp(_) => "timestamp",
            Self::Duration(_) => "duration",
            Self::Delta(_) => "calendar delta",
            Self::Foreign(_) => "foreign delta",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Raw(_) => "raw value",
        }
    }

    /// Replaces a raw value by the timestamp or duration it stands for.
    fn coerce(self) -> Result<Self, DeltaError> {
        let Self::Raw(raw) = self else {
            return Ok(self);
        };
        let coerced = raw
            .to_datetime()
            .map(|datetime| Self::Timestamp(datetime.into()))
            .or_else(|| raw.to_duration().map(Self::Duration));
        match coerced {
            Some(operand) => {
                tracing::debug!(%raw, kind = operand.kind(), "coerced raw operand");
                Ok(operand)
            }
            None => {
                tracing::debug!(%raw, "raw operand cannot be coerced");
                Err(DeltaError::Uncoercible(raw))
            }
        }
    }
}

impl From<Date> for Operand {
    fn from(date: Date) -> Self {
        Self::Timestamp(date.into())
    }
}

impl From<DateTime> for Operand {
    fn from(datetime: DateTime) -> Self {
        Self::Timestamp(datetime.into())
    }
}

/// Result of a delta operation: either a new delta or a shifted timestamp.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Outcome {
    Delta(CalendarDelta),
    DateTime(DateTime),
}

impl Outcome {
    pub fn into_delta(self) -> Option<CalendarDelta> {
        match self {
            Self::Delta(delta) => Some(delta),
            Self::DateTime(_) => None,
        }
    }

    pub fn into_datetime(self) -> Option<DateTime> {
        match self {
            Self::DateTime(datetime) => Some(datetime),
            Self::Delta(_) => None,
        }
    }
}

impl CalendarDelta {
    /// `self + operand`.
    ///
    /// A timestamp operand yields the shifted date-time; every other
    /// accepted operand yields a delta. On the absolute fields the operand
    /// wins wherever it sets them.
    ///
    /// # Errors
    /// `Unsupported` for operands of no accepted kind, `NthWeekday` for a
    /// foreign delta pinning a weekday occurrence, `Uncoercible` for raw
    /// values that are neither a timestamp nor a duration, and
    /// `OutOfRange` when a shifted timestamp leaves years 1..=9999.
    pub fn checked_add(&self, operand: impl Into<Operand>) -> Result<Outcome, DeltaError> {
        match operand.into() {
            Operand::Timestamp(timestamp) => self.apply_to(timestamp).map(Outcome::DateTime),
            Operand::Duration(duration) => Ok(self.add_duration(duration).into()),
            Operand::Delta(other) => Ok(self.add_delta(&other).into()),
            Operand::Foreign(foreign) => Ok(self.add_foreign(&foreign)?.into()),
            Operand::Int(n) => Ok(self.add_int(n).into()),
            Operand::Float(x) => Ok(self.add_float(x, Operation::Add)?.into()),
            raw @ Operand::Raw(_) => self.checked_add(raw.coerce()?),
        }
    }

    /// `self - operand`. On the absolute fields `self` wins wherever it
    /// sets them.
    ///
    /// # Errors
    /// As [`CalendarDelta::checked_add`]; subtracting a timestamp from a
    /// delta is `Unsupported`.
    pub fn checked_sub(&self, operand: impl Into<Operand>) -> Result<Outcome, DeltaError> {
        match operand.into() {
            Operand::Timestamp(_) => Err(DeltaError::unsupported(Operation::Sub, "timestamp")),
            Operand::Duration(duration) => Ok(self.sub_duration(duration).into()),
            Operand::Delta(other) => Ok(self.sub_delta(&other).into()),
            Operand::Foreign(foreign) => Ok(self.sub_foreign(&foreign)?.into()),
            Operand::Int(n) => Ok(self.sub_int(n).into()),
            Operand::Float(x) => Ok(self.sub_float(x)?.into()),
            raw @ Operand::Raw(_) => self.checked_sub(raw.coerce()?),
        }
    }

    /// `operand + self`: the operand is on the left, so `self` wins on the
    /// absolute fields.
    ///
    /// # Errors
    /// As [`CalendarDelta::checked_add`].
    pub fn reflected_add(&self, operand: impl Into<Operand>) -> Result<Outcome, DeltaError> {
        match operand.into() {
            Operand::Timestamp(timestamp) => self.apply_to(timestamp).map(Outcome::DateTime),
            Operand::Duration(duration) => Ok(self.add_duration(duration).into()),
            Operand::Delta(other) => Ok(other.add_delta(self).into()),
            Operand::Foreign(foreign) => Ok(self.radd_foreign(&foreign)?.into()),
            Operand::Int(n) => Ok(self.add_int(n).into()),
            Operand::Float(x) => Ok(self.add_float(x, Operation::ReflectedAdd)?.into()),
            raw @ Operand::Raw(_) => self.reflected_add(raw.coerce()?),
        }
    }

    /// `operand - self`. A timestamp operand is shifted backwards; the
    /// absolute fields of the operand win where set.
    ///
    /// # Errors
    /// As [`CalendarDelta::checked_add`].
    pub fn reflected_sub(&self, operand: impl Into<Operand>) -> Result<Outcome, DeltaError> {
        match operand.into() {
            Operand::Timestamp(timestamp) => self.subtract_from(timestamp).map(Outcome::DateTime),
            Operand::Duration(duration) => Ok(self.rsub_duration(duration).into()),
            Operand::Delta(other) => Ok(other.sub_delta(self).into()),
            Operand::Foreign(foreign) => Ok(self.rsub_foreign(&foreign)?.into()),
            Operand::Int(n) => Ok(self.rsub_int(n).into()),
            Operand::Float(x) => Ok(self.rsub_float(x)?.into()),
            raw @ Operand::Raw(_) => self.reflected_sub(raw.coerce()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeltaConfig, TimeUnit, TzInfo, Weekday};

    fn delta(config: DeltaConfig) -> CalendarDelta {
        CalendarDelta::new(config)
    }

    fn datetime(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: i64) -> DateTime {
        DateTime::new(Date::new(y, mo, d).unwrap(), h, mi, s, 0).unwrap()
    }

    #[test]
    fn test_add_timestamp_yields_datetime() {
        let one_month = delta(DeltaConfig {
            months: 1,
            ..DeltaConfig::default()
        });
        let date = Date::new(2024, 1, 31).unwrap();
        let result = one_month.checked_add(date).unwrap();
        assert_eq!(result.into_datetime(), Some(datetime(2024, 2, 29, 0, 0, 0)));
    }

    #[test]
    fn test_add_and_reflected_add_timestamp_agree() {
        let shift = delta(DeltaConfig {
            days: 3,
            hour: Some(12),
            ..DeltaConfig::default()
        });
        let base = datetime(2023, 6, 1, 8, 30, 0);
        assert_eq!(
            shift.checked_add(base.clone()).unwrap(),
            shift.reflected_add(base).unwrap()
        );
    }

    #[test]
    fn test_sub_timestamp_is_unsupported() {
        let shift = delta(DeltaConfig {
            days: 1,
            ..DeltaConfig::default()
        });
        let err = shift
            .checked_sub(Date::new(2023, 1, 1).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            DeltaError::Unsupported {
                op:      Operation::Sub,
                operand: "timestamp",
            }
        );
    }

    #[test]
    fn test_reflected_sub_timestamp_moves_backwards() {
        let shift = delta(DeltaConfig {
            months: 1,
            days: 1,
            ..DeltaConfig::default()
        });
        let base = datetime(2024, 3, 31, 10, 0, 0).with_tz(TzInfo::new("UTC"));
        let result = shift.reflected_sub(base).unwrap().into_datetime().unwrap();
        assert_eq!(result.to_string(), "2024-02-28T10:00:00[UTC]");
    }

    #[test]
    fn test_add_delta_right_absolute_wins() {
        let left = delta(DeltaConfig {
            days: 1,
            day: Some(5),
            hour: Some(3),
            ..DeltaConfig::default()
        });
        let right = delta(DeltaConfig {
            days: 2,
            day: Some(10),
            ..DeltaConfig::default()
        });

        let sum = left.checked_add(right).unwrap().into_delta().unwrap();
        assert_eq!(sum.days(), 3);
        assert_eq!(sum.day(), Some(10));
        assert_eq!(sum.hour(), Some(3));

        let difference = left.checked_sub(right).unwrap().into_delta().unwrap();
        assert_eq!(difference.days(), -1);
        assert_eq!(difference.day(), Some(5));

        let reflected = left.reflected_add(right).unwrap().into_delta().unwrap();
        assert_eq!(reflected.day(), Some(5), "right + left keeps left's day");

        let reflected = left.reflected_sub(right).unwrap().into_delta().unwrap();
        assert_eq!(reflected.days(), 1);
        assert_eq!(reflected.day(), Some(10), "right - left keeps right's day");
    }

    #[test]
    fn test_duration_operands() {
        let base = delta(DeltaConfig {
            hours: 1,
            weekday: Some(0),
            ..DeltaConfig::default()
        });
        let duration = PlainDuration::new(1, 30, 0);

        let sum = base.checked_add(duration).unwrap().into_delta().unwrap();
        assert_eq!((sum.days(), sum.hours(), sum.seconds()), (1, 1, 30));
        assert_eq!(sum.weekday(), Some(Weekday::Monday));

        let difference = base.checked_sub(duration).unwrap().into_delta().unwrap();
        assert_eq!(
            (difference.days(), difference.hours(), difference.seconds()),
            (-1, 1, -30)
        );

        let reflected = base.reflected_sub(duration).unwrap().into_delta().unwrap();
        assert_eq!(
            (reflected.days(), reflected.hours(), reflected.seconds()),
            (1, -1, 30)
        );
        assert_eq!(reflected.weekday(), Some(Weekday::Monday));
    }

    #[test]
    fn test_foreign_operands() {
        let base = delta(DeltaConfig {
            months: 1,
            day: Some(1),
            ..DeltaConfig::default()
        });
        let foreign = ForeignDelta {
            months: 2,
            day: Some(15),
            ..ForeignDelta::default()
        };

        let sum = base.checked_add(foreign).unwrap().into_delta().unwrap();
        assert_eq!(sum.months(), 3);
        assert_eq!(sum.day(), Some(15));

        let reflected = base.reflected_add(foreign).unwrap().into_delta().unwrap();
        assert_eq!(reflected.day(), Some(1));

        let reflected = base.reflected_sub(foreign).unwrap().into_delta().unwrap();
        assert_eq!(reflected.months(), 1);
        assert_eq!(reflected.day(), Some(15));

        let nth = ForeignDelta {
            weekday: Some(crate::NthWeekday {
                weekday: Weekday::Friday,
                n:       -1,
            }),
            ..ForeignDelta::default()
        };
        assert_eq!(
            base.checked_add(nth),
            Err(DeltaError::NthWeekday { n: -1 })
        );
    }

    #[test]
    fn test_scalar_operands_touch_every_relative_field() {
        let base = delta(DeltaConfig {
            years: 1,
            hours: 2,
            ..DeltaConfig::default()
        });

        let sum = base.checked_add(1_i64).unwrap().into_delta().unwrap();
        assert_eq!((sum.years(), sum.months(), sum.days()), (2, 1, 1));
        assert_eq!((sum.hours(), sum.minutes(), sum.seconds()), (3, 1, 1));
        assert_eq!(sum.microseconds(), 1);

        let reflected = base.reflected_sub(1_i64).unwrap().into_delta().unwrap();
        assert_eq!((reflected.years(), reflected.months()), (0, 1));
        assert_eq!(reflected.hours(), -1);
    }

    #[test]
    fn test_non_finite_float_is_unsupported() {
        let base = CalendarDelta::zero();
        assert!(matches!(
            base.checked_add(f64::NAN),
            Err(DeltaError::Unsupported {
                op:      Operation::Add,
                operand: _,
            })
        ));
    }

    #[test]
    fn test_raw_values_are_coerced() {
        let shift = delta(DeltaConfig {
            days: 1,
            ..DeltaConfig::default()
        });

        let raw_date = RawValue::DateTime64 {
            value: 0,
            unit:  TimeUnit::Days,
        };
        let shifted = shift.checked_add(raw_date).unwrap().into_datetime().unwrap();
        assert_eq!(shifted, datetime(1970, 1, 2, 0, 0, 0));

        let raw_duration = RawValue::TimeDelta64 {
            value: 90,
            unit:  TimeUnit::Minutes,
        };
        let sum = shift.checked_add(raw_duration).unwrap().into_delta().unwrap();
        assert_eq!((sum.days(), sum.hours(), sum.minutes()), (1, 1, 30));

        let sub = shift.checked_sub(raw_date).unwrap_err();
        assert!(matches!(sub, DeltaError::Unsupported { .. }));

        let not_a_time = RawValue::TimeDelta64 {
            value: crate::NOT_A_TIME,
            unit:  TimeUnit::Seconds,
        };
        assert_eq!(
            shift.checked_add(not_a_time),
            Err(DeltaError::Uncoercible(not_a_time))
        );
    }

    #[test]
    fn test_operand_kind() {
        assert_eq!(Operand::from(3_i64).kind(), "integer");
        assert_eq!(Operand::from(0.5).kind(), "float");
        assert_eq!(Operand::from(PlainDuration::ZERO).kind(), "duration");
        assert_eq!(
            Operand::from(Date::new(2000, 1, 1).unwrap()).kind(),
            "timestamp"
        );
    }
}
