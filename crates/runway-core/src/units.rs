//! Display units for time axes.
//!
//! The model always works in weeks; the unit only tells the presentation
//! layer how to label and scale time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_WEEK, DAYS_PER_YEAR};

/// Time unit used to present the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    /// Weeks (the model's native unit).
    #[default]
    Week,
    /// Calendar months (1/12 of a mean year).
    Month,
    /// Mean Gregorian years.
    Year,
}

/// Error returned when a unit name is not one of `week`, `month`, `year`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display unit {0:?} (expected week, month or year)")]
pub struct ParseUnitError(pub String);

impl DisplayUnit {
    /// All units in cycling order.
    pub const ALL: [Self; 3] = [Self::Week, Self::Month, Self::Year];

    /// The unit that follows this one: week → month → year → week.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Week => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Week,
        }
    }

    /// Lowercase name, as used in parameter records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Number of model weeks in one unit.
    #[must_use]
    pub fn weeks_per_unit(self) -> f64 {
        match self {
            Self::Week => 1.0,
            Self::Month => DAYS_PER_YEAR / 12.0 / DAYS_PER_WEEK,
            Self::Year => DAYS_PER_YEAR / DAYS_PER_WEEK,
        }
    }

    /// Convert a duration in weeks to this unit.
    #[must_use]
    pub fn from_weeks(self, weeks: f64) -> f64 {
        weeks / self.weeks_per_unit()
    }

    /// Convert a duration in this unit to weeks.
    #[must_use]
    pub fn to_weeks(self, amount: f64) -> f64 {
        amount * self.weeks_per_unit()
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "weeks" | "w" => Ok(Self::Week),
            "month" | "months" | "m" => Ok(Self::Month),
            "year" | "years" | "y" => Ok(Self::Year),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}
