//! Domain errors raised when an operation would leave the model undefined.

/// Error type for growth model operations.
///
/// Every mutator validates its input before touching the model; when one of
/// these is returned the model is unchanged and no observer was notified.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrowthError {
    /// A revenue, expense or target value was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A weekly growth rate at or below -100 %.
    #[error("{field} must be greater than -1 (-100% per week), got {value}")]
    GrowthRateOutOfRange {
        /// Name of the offending parameter.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The display horizon was not a positive number of weeks.
    #[error("horizon must be a positive number of weeks, got {0}")]
    InvalidHorizon(f64),

    /// A NaN or infinite input, or a result that overflowed.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending input or derived field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// No real growth rate carries the intercept to the requested point.
    #[error("no growth rate reaches {value} at week {week} starting from {intercept}")]
    DegenerateSolve {
        /// Week of the requested point.
        week: f64,
        /// Requested value at that week.
        value: f64,
        /// Current intercept of the curve.
        intercept: f64,
    },
}

impl GrowthError {
    /// Reject NaN and infinities for the named input.
    pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { field, value })
        }
    }

    /// Reject non-finite, zero and negative values for the named input.
    pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<f64, Self> {
        Self::check_finite(field, value)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(Self::NonPositive { field, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_error_display() {
        let err = GrowthError::NonPositive {
            field: "rev0",
            value: -3.0,
        };
        assert_eq!(err.to_string(), "rev0 must be positive, got -3");

        let err = GrowthError::InvalidHorizon(0.0);
        assert_eq!(
            err.to_string(),
            "horizon must be a positive number of weeks, got 0"
        );
    }

    #[test]
    fn check_positive_rejects_zero_and_nan() {
        assert!(GrowthError::check_positive("x", 1.5).is_ok());
        assert!(matches!(
            GrowthError::check_positive("x", 0.0),
            Err(GrowthError::NonPositive { field: "x", .. })
        ));
        assert!(matches!(
            GrowthError::check_positive("x", f64::NAN),
            Err(GrowthError::NonFinite { field: "x", .. })
        ));
        assert!(matches!(
            GrowthError::check_positive("x", f64::INFINITY),
            Err(GrowthError::NonFinite { .. })
        ));
    }
}
