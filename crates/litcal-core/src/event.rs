//! Canonical event and response types.
//!
//! These are the shapes handed back to callers after the upstream payload has
//! been reconciled. They are built fresh for every request and never mutated
//! afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ValidationError;
use crate::filter::Filters;

/// A dated liturgical celebration in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalEvent {
    /// Celebration name, `"Unknown"` when the upstream omitted it.
    pub name: String,
    /// UTC calendar date, serialized as `YYYY-MM-DD`; `None` if unparseable.
    pub date: Option<NaiveDate>,
    /// Grade as sent by the upstream, not range-checked and possibly fractional.
    pub grade: Option<Number>,
    /// Grade name from the grade table, `"Unknown"` when out of range or
    /// not an integer.
    pub grade_name: String,
    /// Liturgical colors.
    pub color: Vec<String>,
    /// Commons used for the celebration.
    pub common: Vec<String>,
    /// Liturgical year cycle label.
    pub liturgical_year: Option<String>,
}

impl CanonicalEvent {
    /// Ordering used for calendar output.
    ///
    /// Ascending date; events sharing a date put the higher grade first (an
    /// absent grade last). Undated events go after every dated event and
    /// compare equal to each other, so a stable sort keeps their order.
    pub fn chronological(&self, other: &Self) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| compare_grades(other.grade.as_ref(), self.grade.as_ref())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn compare_grades(a: Option<&Number>, b: Option<&Number>) -> Ordering {
    match (a.and_then(Number::as_f64), b.and_then(Number::as_f64)) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Metadata block of a [`CalendarResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMetadata {
    pub locale: Option<String>,
    pub national_calendar: Option<String>,
    pub diocesan_calendar: Option<String>,
    pub year: Option<i64>,
    /// Number of events after filtering.
    pub total_events: usize,
    /// Echo of the filters that were applied.
    pub filters_applied: Filters,
}

/// A normalized calendar for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarResponse {
    pub metadata: CalendarMetadata,
    pub events: Vec<CanonicalEvent>,
}

/// A static event definition from the events catalogue.
///
/// Unlike [`CanonicalEvent`], absent fields stay `None`: a definition without
/// a name is a different thing from a dated event whose name failed to map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDefinition {
    pub event_key: String,
    pub name: Option<String>,
    pub grade: Option<Number>,
    pub grade_name: Option<String>,
    pub color: Option<Vec<String>>,
    pub common: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
    pub liturgical_year: Option<String>,
}

/// Filter echo for an [`EventsResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventsFiltersApplied {
    pub grade: Option<Vec<i64>>,
}

/// A normalized events catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventsResponse {
    pub calendar_type: CalendarType,
    pub nation: Option<String>,
    pub diocese: Option<String>,
    pub total_events: usize,
    pub filters_applied: EventsFiltersApplied,
    pub events: Vec<EventDefinition>,
}

/// The kind of calendar an events catalogue is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    /// The General Roman Calendar.
    #[default]
    General,
    /// A national calendar.
    National,
    /// A diocesan calendar.
    Diocesan,
}

impl CalendarType {
    /// Returns the wire name of this calendar type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::National => "national",
            Self::Diocesan => "diocesan",
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "national" => Ok(Self::National),
            "diocesan" => Ok(Self::Diocesan),
            _ => Err(ValidationError::InvalidCalendarType(s.to_string())),
        }
    }
}

/// A national calendar offered by the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalCalendarSummary {
    pub calendar_id: String,
    pub locales: Vec<String>,
}

/// A diocesan calendar offered by the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiocesanCalendarSummary {
    pub calendar_id: String,
    pub diocese: Option<String>,
    pub nation: Option<String>,
    pub locales: Vec<String>,
}

/// Summary of every calendar the upstream can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarListing {
    pub total_national_calendars: usize,
    pub total_diocesan_calendars: usize,
    pub national_calendars: Vec<NationalCalendarSummary>,
    pub diocesan_calendars: Vec<DiocesanCalendarSummary>,
    pub locales: Vec<String>,
}
