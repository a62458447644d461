//! Scaling, negation and absolute value.
//!
//! Integer factors multiply every relative field and normalize again.
//! Float factors go through a cascade that rounds each unit half away from
//! zero and pushes the rounding remainder into the next smaller unit:
//! years into months (×12), and days into hours (×24), minutes (×60),
//! seconds (×60) and microseconds (×1 000 000). Months never spill into
//! days. Absolute fields are carried through unchanged.

use std::ops::{Mul, Neg};

use crate::consts::{
    HOURS_PER_DAY, MICROS_PER_SECOND, MINUTES_PER_HOUR, MONTHS_PER_YEAR, SECONDS_PER_MINUTE,
};
use crate::normalize::Relative;
use crate::operand::Operand;
use crate::{CalendarDelta, DeltaError, Operation};

/// Rounds half away from zero; out-of-range values saturate and NaN is 0.
#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Remainder of `value` after rounding, expressed in `per` smaller units.
#[allow(clippy::cast_precision_loss)]
fn spill(value: f64, rounded: i64, per: i64) -> f64 {
    (value - rounded as f64) * per as f64
}

impl CalendarDelta {
    /// Rebuilds the relative fields from `value(field)` with the rounding
    /// cascade. Absolute fields are kept.
    pub(crate) fn cascade(&self, value: impl Fn(i64) -> f64) -> Self {
        let relative = self.relative();

        let years_value = value(relative.years);
        let years = round(years_value);
        let months = round(value(relative.months) + spill(years_value, years, MONTHS_PER_YEAR));

        let days_value = value(relative.days);
        let days = round(days_value);
        let hours_value = value(relative.hours) + spill(days_value, days, HOURS_PER_DAY);
        let hours = round(hours_value);
        let minutes_value = value(relative.minutes) + spill(hours_value, hours, MINUTES_PER_HOUR);
        let minutes = round(minutes_value);
        let seconds_value =
            value(relative.seconds) + spill(minutes_value, minutes, SECONDS_PER_MINUTE);
        let seconds = round(seconds_value);
        let microseconds = round(
            value(relative.microseconds) + spill(seconds_value, seconds, MICROS_PER_SECOND),
        );

        self.with_relative(Relative {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            microseconds,
        })
    }

    pub(crate) fn mul_int(&self, factor: i64) -> Self {
        self.with_relative(self.relative().map(|v| v.saturating_mul(factor)))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn mul_float(&self, factor: f64) -> Self {
        self.cascade(|v| v as f64 * factor)
    }

    /// `self * factor` for an integer or float factor.
    ///
    /// # Errors
    /// `InvalidFactor` for a NaN or infinite float, `Unsupported` for any
    /// non-numeric operand.
    pub fn scale(&self, factor: impl Into<Operand>) -> Result<Self, DeltaError> {
        match factor.into() {
            Operand::Int(n) => Ok(self.mul_int(n)),
            Operand::Float(x) if x.is_finite() => Ok(self.mul_float(x)),
            Operand::Float(x) => Err(DeltaError::InvalidFactor(x)),
            other => Err(DeltaError::unsupported(Operation::Mul, other.kind())),
        }
    }

    /// `self / divisor`, computed as a float scale by `1 / divisor`, so
    /// integer division still rounds through the cascade.
    ///
    /// # Errors
    /// `DivisionByZero` for a zero divisor, `InvalidFactor` when the
    /// reciprocal is not finite, `Unsupported` for any non-numeric operand.
    #[allow(clippy::cast_precision_loss)]
    pub fn divide(&self, divisor: impl Into<Operand>) -> Result<Self, DeltaError> {
        let divisor = match divisor.into() {
            Operand::Int(n) => n as f64,
            Operand::Float(x) => x,
            other => return Err(DeltaError::unsupported(Operation::Div, other.kind())),
        };
        if divisor == 0.0 {
            return Err(DeltaError::DivisionByZero);
        }
        let factor = divisor.recip();
        if !factor.is_finite() {
            return Err(DeltaError::InvalidFactor(divisor));
        }
        Ok(self.mul_float(factor))
    }

    /// Every relative field negated; absolute fields kept.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.with_relative(self.relative().map(i64::saturating_neg))
    }

    /// Every relative field made non-negative; absolute fields kept.
    #[must_use]
    pub fn absolute(&self) -> Self {
        self.with_relative(self.relative().map(i64::saturating_abs))
    }
}

impl Mul<i64> for CalendarDelta {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        self.mul_int(rhs)
    }
}

impl Mul<CalendarDelta> for i64 {
    type Output = CalendarDelta;

    fn mul(self, rhs: CalendarDelta) -> CalendarDelta {
        rhs.mul_int(self)
    }
}

/// Non-finite factors saturate (NaN scales to zero); use
/// [`CalendarDelta::scale`] to reject them instead.
impl Mul<f64> for CalendarDelta {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.mul_float(rhs)
    }
}

impl Mul<CalendarDelta> for f64 {
    type Output = CalendarDelta;

    fn mul(self, rhs: CalendarDelta) -> CalendarDelta {
        rhs.mul_float(self)
    }
}

impl Neg for CalendarDelta {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}
