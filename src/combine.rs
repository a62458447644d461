//! Addition and subtraction of deltas with each other, with plain durations,
//! with foreign deltas and with scalars.
//!
//! Relative fields combine field by field and are normalized again.
//! Absolute fields are never summed: in `a + b` the right operand wins where
//! it sets a field, in `a - b` the left operand does.

use std::ops::{Add, Sub};

use crate::interop::{ForeignDelta, PlainDuration};
use crate::normalize::Relative;
use crate::{CalendarDelta, DeltaError, Operation};

impl CalendarDelta {
    pub(crate) fn add_delta(&self, other: &Self) -> Self {
        Self::from_parts(
            self.relative().zip(other.relative(), i64::saturating_add),
            other.absolute_fields().or(self.absolute_fields()),
        )
    }

    pub(crate) fn sub_delta(&self, other: &Self) -> Self {
        Self::from_parts(
            self.relative().zip(other.relative(), i64::saturating_sub),
            self.absolute_fields().or(other.absolute_fields()),
        )
    }

    pub(crate) fn add_duration(&self, duration: PlainDuration) -> Self {
        self.with_relative(self.relative().zip(duration_parts(duration), i64::saturating_add))
    }

    pub(crate) fn sub_duration(&self, duration: PlainDuration) -> Self {
        self.with_relative(self.relative().zip(duration_parts(duration), i64::saturating_sub))
    }

    /// `duration - self`: the relative part is negated, the absolute part kept.
    pub(crate) fn rsub_duration(&self, duration: PlainDuration) -> Self {
        self.with_relative(duration_parts(duration).zip(self.relative(), i64::saturating_sub))
    }

    pub(crate) fn add_foreign(&self, foreign: &ForeignDelta) -> Result<Self, DeltaError> {
        Ok(self.add_delta(&Self::try_from(foreign)?))
    }

    pub(crate) fn radd_foreign(&self, foreign: &ForeignDelta) -> Result<Self, DeltaError> {
        Ok(Self::try_from(foreign)?.add_delta(self))
    }

    pub(crate) fn sub_foreign(&self, foreign: &ForeignDelta) -> Result<Self, DeltaError> {
        Ok(self.sub_delta(&Self::try_from(foreign)?))
    }

    pub(crate) fn rsub_foreign(&self, foreign: &ForeignDelta) -> Result<Self, DeltaError> {
        Ok(Self::try_from(foreign)?.sub_delta(self))
    }

    /// Adds `n` to every relative field.
    pub(crate) fn add_int(&self, n: i64) -> Self {
        self.with_relative(self.relative().map(|v| v.saturating_add(n)))
    }

    pub(crate) fn sub_int(&self, n: i64) -> Self {
        self.with_relative(self.relative().map(|v| v.saturating_sub(n)))
    }

    /// `n - field` for every relative field.
    pub(crate) fn rsub_int(&self, n: i64) -> Self {
        self.with_relative(self.relative().map(|v| n.saturating_sub(v)))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn add_float(&self, x: f64, op: Operation) -> Result<Self, DeltaError> {
        let x = finite(x, op)?;
        Ok(self.cascade(|v| v as f64 + x))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn sub_float(&self, x: f64) -> Result<Self, DeltaError> {
        let x = finite(x, Operation::Sub)?;
        Ok(self.cascade(|v| v as f64 - x))
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn rsub_float(&self, x: f64) -> Result<Self, DeltaError> {
        let x = finite(x, Operation::ReflectedSub)?;
        Ok(self.cascade(|v| x - v as f64))
    }
}

fn finite(x: f64, op: Operation) -> Result<f64, DeltaError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(DeltaError::unsupported(op, "non-finite float"))
    }
}

fn duration_parts(duration: PlainDuration) -> Relative {
    Relative {
        days:         duration.days(),
        seconds:      duration.seconds(),
        microseconds: duration.microseconds(),
        ..Relative::default()
    }
}

impl Add for CalendarDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_delta(&rhs)
    }
}

impl Sub for CalendarDelta {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.sub_delta(&rhs)
    }
}

impl Add<PlainDuration> for CalendarDelta {
    type Output = Self;

    fn add(self, rhs: PlainDuration) -> Self {
        self.add_duration(rhs)
    }
}

impl Sub<PlainDuration> for CalendarDelta {
    type Output = Self;

    fn sub(self, rhs: PlainDuration) -> Self {
        self.sub_duration(rhs)
    }
}

impl Add<CalendarDelta> for PlainDuration {
    type Output = CalendarDelta;

    fn add(self, rhs: CalendarDelta) -> CalendarDelta {
        rhs.add_duration(self)
    }
}

impl Sub<CalendarDelta> for PlainDuration {
    type Output = CalendarDelta;

    fn sub(self, rhs: CalendarDelta) -> CalendarDelta {
        rhs.rsub_duration(self)
    }
}

impl Add<i64> for CalendarDelta {
    type Output = Self;

    fn add(self, rhs: i64) -> Self {
        self.add_int(rhs)
    }
}

impl Sub<i64> for CalendarDelta {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self {
        self.sub_int(rhs)
    }
}
