//! Parsing of caller-supplied filter arguments.
//!
//! Month and grade filters are lenient: anything that does not parse is
//! dropped and the request proceeds unfiltered. An unrecognized filter must
//! never hide every event. The year is the exception, since there is no
//! sensible calendar to fall back to.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::grade::is_valid_grade;

/// Earliest supported calendar year.
pub const MIN_YEAR: i64 = 1970;

/// Latest supported calendar year.
pub const MAX_YEAR: i64 = 9999;

/// Leading integer with an optional sign, as read by `parseInt`-style parsers.
static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("Invalid leading integer regex"));

/// Reads the leading integer of `text`, ignoring anything after it.
///
/// `"1.5"` reads as `1`, `"7th"` as `7`; text without leading digits is `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT
        .find(text.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses an optional month filter.
///
/// Returns `None` (no filter) for absent, empty, non-numeric or out-of-range
/// input.
pub fn parse_month_filter(input: Option<&str>) -> Option<u32> {
    let text = input?.trim();
    if text.is_empty() {
        return None;
    }

    parse_leading_int(text)
        .filter(|month| (1..=12).contains(month))
        .and_then(|month| u32::try_from(month).ok())
}

/// Parses an optional grade filter.
///
/// A number is a single grade; `0` as a number is treated as absent. A string
/// is a comma-separated list where invalid or out-of-range pieces are dropped.
/// Duplicates are kept. If nothing survives, the result is `None`.
pub fn parse_grade_filter(input: Option<&Value>) -> Option<Vec<i64>> {
    match input? {
        Value::Number(number) => {
            let value = number.as_f64()?;
            if value == 0.0 || !value.is_finite() {
                return None;
            }
            let grade = value.trunc() as i64;
            is_valid_grade(grade).then(|| vec![grade])
        }
        Value::String(text) => parse_grade_list(text),
        _ => None,
    }
}

/// Parses a comma-separated list of grades.
pub fn parse_grade_list(text: &str) -> Option<Vec<i64>> {
    if text.trim().is_empty() {
        return None;
    }

    let grades: Vec<i64> = text
        .split(',')
        .filter_map(parse_leading_int)
        .filter(|grade| is_valid_grade(*grade))
        .collect();

    (!grades.is_empty()).then_some(grades)
}

/// Validates a requested year, defaulting to the current UTC year.
pub fn validate_year(input: Option<&str>) -> ValidationResult<i32> {
    validate_year_or(input, Utc::now().year())
}

/// Validates a requested year, using `default_year` when the input is absent.
pub fn validate_year_or(input: Option<&str>, default_year: i32) -> ValidationResult<i32> {
    let year = match input.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => text
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidYear(text.to_string()))?,
        None => i64::from(default_year),
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }

    i32::try_from(year).map_err(|_| ValidationError::YearOutOfRange(year))
}

/// Filters applied to a normalized event list.
///
/// An absent filter means "no restriction", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    /// Calendar month (1-12).
    pub month: Option<u32>,
    /// Accepted grades.
    #[serde(rename = "grade")]
    pub grades: Option<Vec<i64>>,
}

impl Filters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to a calendar month.
    pub fn with_month(mut self, month: Option<u32>) -> Self {
        self.month = month;
        self
    }

    /// Builder: restrict to a set of grades. An empty list is no restriction.
    pub fn with_grades(mut self, grades: Option<Vec<i64>>) -> Self {
        self.grades = grades.filter(|g| !g.is_empty());
        self
    }

    /// Returns true if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.grades.is_none()
    }

    /// Returns true if `date` passes the month filter.
    ///
    /// An event without a date never matches an active month filter.
    pub fn matches_month(&self, date: Option<NaiveDate>) -> bool {
        match self.month {
            Some(month) => date.is_some_and(|d| d.month() == month),
            None => true,
        }
    }

    /// Returns true if `grade` passes the grade filter.
    pub fn matches_grade(&self, grade: Option<i64>) -> bool {
        match &self.grades {
            Some(grades) => grade.is_some_and(|g| grades.contains(&g)),
            None => true,
        }
    }
}
