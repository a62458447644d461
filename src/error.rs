use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_YEAR};
use crate::interop::RawValue;
use crate::prelude::*;

/// Validation failure for the interop date and time types.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i64),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(i64),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: i64 },
    #[display(fmt = "Invalid {field}: {value}")]
    InvalidTime { field: &'static str, value: i64 },
    #[display(fmt = "Invalid fold: {_0} (must be 0 or 1)")]
    InvalidFold(u8),
}

impl std::error::Error for DateError {}

/// The arithmetic operation that rejected an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Operation {
    #[display(fmt = "addition")]
    Add,
    #[display(fmt = "subtraction")]
    Sub,
    #[display(fmt = "reflected addition")]
    ReflectedAdd,
    #[display(fmt = "reflected subtraction")]
    ReflectedSub,
    #[display(fmt = "multiplication")]
    Mul,
    #[display(fmt = "division")]
    Div,
}

/// Error type for delta arithmetic.
///
/// `Unsupported`, `NthWeekday` and `Uncoercible` are the "operation not
/// supported" outcomes of operand dispatch. `DivisionByZero` and
/// `InvalidFactor` are the hard failures of scaling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeltaError {
    /// The operand kind is not accepted by the operation.
    #[error("Unsupported operand for {op}: {operand}")]
    Unsupported { op: Operation, operand: &'static str },

    /// A foreign delta pins the n-th occurrence of a weekday.
    #[error("Weekday occurrence {n} cannot be represented by a calendar delta")]
    NthWeekday { n: i32 },

    /// Last-resort coercion of a raw time value failed.
    #[error("Raw value cannot be coerced: {0}")]
    Uncoercible(RawValue),

    #[error("Division by zero")]
    DivisionByZero,

    /// The factor (or the reciprocal of the divisor) is NaN or infinite.
    #[error("Invalid scale factor: {0}")]
    InvalidFactor(f64),

    /// Applying the delta left the supported calendar range.
    #[error("Result is outside the supported range (years {}-{})", MIN_YEAR, MAX_YEAR)]
    OutOfRange,

    #[error(transparent)]
    Date(#[from] DateError),
}

impl DeltaError {
    pub(crate) fn unsupported(op: Operation, operand: &'static str) -> Self {
        tracing::debug!(%op, operand, "operand not supported");
        Self::Unsupported { op, operand }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_display() {
        assert_eq!(
            DateError::InvalidYear(0).to_string(),
            "Invalid year: 0 (must be 1-9999)"
        );
        assert_eq!(
            DateError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            DateError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            }
            .to_string(),
            "Invalid day 29 for month 2023-02"
        );
        assert_eq!(
            DateError::InvalidTime {
                field: "hour",
                value: 24
            }
            .to_string(),
            "Invalid hour: 24"
        );
    }

    #[test]
    fn test_delta_error_display() {
        let err = DeltaError::Unsupported {
            op: Operation::Sub,
            operand: "timestamp",
        };
        assert_eq!(err.to_string(), "Unsupported operand for subtraction: timestamp");
        assert_eq!(DeltaError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            DeltaError::OutOfRange.to_string(),
            "Result is outside the supported range (years 1-9999)"
        );
    }

    #[test]
    fn test_date_error_converts_transparently() {
        let err: DeltaError = DateError::InvalidMonth(0).into();
        assert_eq!(err.to_string(), "Invalid month: 0 (must be 1-12)");
    }
}
