//! Liturgical grade table.
//!
//! Grades rank a celebration's precedence from 0 (weekday) to 7 (higher
//! solemnity). The upstream API sends grades as bare integers; values it may
//! add in the future are carried through untouched and simply have no name.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Name reported for grades outside the table.
pub const UNKNOWN_GRADE_NAME: &str = "Unknown";

/// Lowest grade in the table.
pub const MIN_GRADE: i64 = 0;

/// Highest grade in the table.
pub const MAX_GRADE: i64 = 7;

/// The eight precedence grades of a liturgical celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Weekday,
    Commemoration,
    OptionalMemorial,
    Memorial,
    Feast,
    FeastOfTheLord,
    Solemnity,
    HigherSolemnity,
}

impl Grade {
    /// All grades in ascending order.
    pub const ALL: [Grade; 8] = [
        Grade::Weekday,
        Grade::Commemoration,
        Grade::OptionalMemorial,
        Grade::Memorial,
        Grade::Feast,
        Grade::FeastOfTheLord,
        Grade::Solemnity,
        Grade::HigherSolemnity,
    ];

    /// Looks up a grade by its numeric value.
    pub fn from_value(value: i64) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Returns the numeric value used by the upstream API.
    pub fn value(self) -> i64 {
        self as i64
    }

    /// Returns the display name of this grade.
    pub fn name(self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Commemoration => "Commemoration",
            Self::OptionalMemorial => "Optional Memorial",
            Self::Memorial => "Memorial",
            Self::Feast => "Feast",
            Self::FeastOfTheLord => "Feast of the Lord",
            Self::Solemnity => "Solemnity",
            Self::HigherSolemnity => "Higher Solemnity",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if `value` is inside the grade table.
pub fn is_valid_grade(value: i64) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&value)
}

/// Returns the grade name for `value`, or [`UNKNOWN_GRADE_NAME`] when out of range.
pub fn grade_name(value: i64) -> &'static str {
    Grade::from_value(value).map_or(UNKNOWN_GRADE_NAME, Grade::name)
}

/// Returns an upstream grade as an integer, or `None` if it has a fraction.
pub fn integral_grade(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.is_finite() && value.fract() == 0.0)
            .map(|value| value as i64)
    })
}

/// Grade name for an upstream grade as sent. Non-integral grades are unknown.
pub fn grade_name_of(number: &Number) -> &'static str {
    integral_grade(number).map_or(UNKNOWN_GRADE_NAME, grade_name)
}
