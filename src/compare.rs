//! Equality and hashing.
//!
//! Two deltas are equal when all fifteen canonical fields match. The hash is
//! computed once at construction from the same fields, so equal deltas
//! always hash equally.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::CalendarDelta;
use crate::consts::{MICROS_PER_DAY, MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};
use crate::interop::{ForeignDelta, PlainDuration};
use crate::normalize::{Absolute, Relative};
use crate::operand::Operand;

pub(crate) fn hash_fields(relative: &Relative, absolute: &Absolute) -> u64 {
    let mut hasher = DefaultHasher::new();
    relative.hash(&mut hasher);
    absolute.hash(&mut hasher);
    hasher.finish()
}

impl CalendarDelta {
    /// The hash computed at construction.
    pub const fn hash_value(&self) -> u64 {
        self.hashcode
    }

    /// Total exact offset in microseconds, or `None` if the delta has a
    /// calendar part (years, months or any absolute field).
    fn exact_micros(&self) -> Option<i128> {
        let relative = self.relative();
        if relative.years != 0 || relative.months != 0 || !self.absolute_fields().is_unset() {
            return None;
        }
        Some(
            i128::from(relative.days) * i128::from(MICROS_PER_DAY)
                + i128::from(relative.hours) * i128::from(MICROS_PER_HOUR)
                + i128::from(relative.minutes) * i128::from(MICROS_PER_MINUTE)
                + i128::from(relative.seconds) * i128::from(MICROS_PER_SECOND)
                + i128::from(relative.microseconds),
        )
    }

    /// Equality against any operand kind. Timestamps and scalars are never
    /// equal to a delta; raw durations are compared after coercion.
    pub fn equals(&self, other: &Operand) -> bool {
        match other {
            Operand::Delta(delta) => self == delta,
            Operand::Duration(duration) => self == duration,
            Operand::Foreign(foreign) => self == foreign,
            Operand::Raw(raw) => raw.to_duration().is_some_and(|duration| *self == duration),
            Operand::Timestamp(_) | Operand::Int(_) | Operand::Float(_) => false,
        }
    }
}

impl PartialEq for CalendarDelta {
    fn eq(&self, other: &Self) -> bool {
        self.hashcode == other.hashcode
            && self.relative() == other.relative()
            && self.absolute_fields() == other.absolute_fields()
    }
}

impl Eq for CalendarDelta {}

impl Hash for CalendarDelta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hashcode);
    }
}

/// Equal when the delta has no calendar part and the same total length.
impl PartialEq<PlainDuration> for CalendarDelta {
    fn eq(&self, other: &PlainDuration) -> bool {
        self.exact_micros() == Some(other.total_micros())
    }
}

impl PartialEq<CalendarDelta> for PlainDuration {
    fn eq(&self, other: &CalendarDelta) -> bool {
        other == self
    }
}

/// Never equal when the foreign delta pins a weekday occurrence.
impl PartialEq<ForeignDelta> for CalendarDelta {
    fn eq(&self, other: &ForeignDelta) -> bool {
        Self::try_from(other).is_ok_and(|converted| *self == converted)
    }
}

impl PartialEq<CalendarDelta> for ForeignDelta {
    fn eq(&self, other: &CalendarDelta) -> bool {
        other == self
    }
}
