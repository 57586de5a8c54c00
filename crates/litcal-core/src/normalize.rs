//! Upstream payload to canonical response conversion.
//!
//! The upstream API is inconsistent in two ways this module absorbs:
//!
//! - event dates arrive as epoch seconds or as ISO-8601 strings depending on
//!   the calendar queried (handled by [`crate::date`]);
//! - event collections arrive either as an array or as a mapping keyed by
//!   event identifier.
//!
//! The collection shape is reconciled once, in [`raw_entries`]. Filtering and
//! sorting only ever see a `Vec`.
//!
//! The pipeline for a calendar:
//! 1. Locate `litcal` and reconcile it into a list of raw entries
//! 2. Map each entry to a [`CanonicalEvent`]; one malformed event fails the
//!    whole payload
//! 3. Apply the month and grade filters
//! 4. Sort chronologically (see [`CanonicalEvent::chronological`])
//! 5. Build the metadata block from `settings`

use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::date::parse_date_value;
use crate::error::{NormalizeError, NormalizeResult};
use crate::event::{
    CalendarListing, CalendarMetadata, CalendarResponse, CalendarType, CanonicalEvent,
    DiocesanCalendarSummary, EventDefinition, EventsFiltersApplied, EventsResponse,
    NationalCalendarSummary,
};
use crate::filter::Filters;
use crate::grade::{UNKNOWN_GRADE_NAME, grade_name_of, integral_grade};

/// Field holding the dated events of a calendar payload.
pub const CALENDAR_EVENTS_FIELD: &str = "litcal";

/// Field holding the definitions of an events payload.
pub const EVENT_DEFINITIONS_FIELD: &str = "litcal_events";

/// Field holding the metadata of a calendar listing payload.
pub const LISTING_METADATA_FIELD: &str = "litcal_metadata";

/// Name given to an event the upstream sent without one.
const UNKNOWN_EVENT_NAME: &str = "Unknown";

/// One element of an upstream event collection.
#[derive(Debug, Clone, Copy)]
struct RawEntry<'a> {
    /// Mapping key, when the collection was a mapping.
    map_key: Option<&'a str>,
    /// Position in the collection.
    index: usize,
    value: &'a Value,
}

impl RawEntry<'_> {
    /// Identifier used in error messages and as the definition key.
    fn identifier(&self) -> Option<String> {
        self.value
            .get("event_key")
            .and_then(Value::as_str)
            .or(self.map_key)
            .map(str::to_string)
    }

    fn label(&self) -> String {
        self.identifier()
            .unwrap_or_else(|| format!("#{}", self.index))
    }
}

/// Reconciles an array-or-mapping collection into a single list.
///
/// Mapping values keep their upstream order. Anything else is `None`.
fn raw_entries(collection: &Value) -> Option<Vec<RawEntry<'_>>> {
    match collection {
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| RawEntry {
                    map_key: None,
                    index,
                    value,
                })
                .collect(),
        ),
        Value::Object(map) => Some(
            map.iter()
                .enumerate()
                .map(|(index, (key, value))| RawEntry {
                    map_key: Some(key.as_str()),
                    index,
                    value,
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Normalizes a raw calendar payload.
///
/// # Errors
///
/// Returns [`NormalizeError::NoCalendarData`] when `litcal` is missing or not
/// a collection, and [`NormalizeError::MalformedEvent`] when any single event
/// cannot be mapped.
pub fn normalize_calendar_response(
    raw: &Value,
    filters: &Filters,
) -> NormalizeResult<CalendarResponse> {
    let entries = raw
        .get(CALENDAR_EVENTS_FIELD)
        .and_then(raw_entries)
        .ok_or(NormalizeError::NoCalendarData)?;

    let received = entries.len();
    let mut events = entries
        .iter()
        .map(canonical_event)
        .collect::<NormalizeResult<Vec<_>>>()
        .inspect_err(|e| warn!(error = %e, "Rejecting calendar payload"))?;

    events.retain(|event| {
        filters.matches_month(event.date)
            && filters.matches_grade(event.grade.as_ref().and_then(integral_grade))
    });
    events.sort_by(CanonicalEvent::chronological);

    debug!(
        received = received,
        kept = events.len(),
        month = ?filters.month,
        grades = ?filters.grades,
        "Normalized calendar"
    );

    let settings = raw.get("settings");
    let metadata = CalendarMetadata {
        locale: setting_str(settings, "locale"),
        national_calendar: setting_str(settings, "national_calendar"),
        diocesan_calendar: setting_str(settings, "diocesan_calendar"),
        year: setting_year(settings),
        total_events: events.len(),
        filters_applied: filters.clone(),
    };

    Ok(CalendarResponse { metadata, events })
}

/// Normalizes a raw events-catalogue payload.
///
/// Definitions keep their upstream order. Only the grade filter applies; a
/// definition without a grade never matches an active grade filter.
///
/// # Errors
///
/// Returns [`NormalizeError::NoEventDefinitions`] when `litcal_events` is
/// missing and [`NormalizeError::MalformedEvent`] for a broken definition.
pub fn normalize_events_response(
    raw: &Value,
    calendar_type: CalendarType,
    nation: Option<&str>,
    diocese: Option<&str>,
    grades: Option<&[i64]>,
) -> NormalizeResult<EventsResponse> {
    let entries = raw
        .get(EVENT_DEFINITIONS_FIELD)
        .and_then(raw_entries)
        .ok_or(NormalizeError::NoEventDefinitions)?;

    let grades = grades.filter(|g| !g.is_empty());
    let mut events = entries
        .iter()
        .map(event_definition)
        .collect::<NormalizeResult<Vec<_>>>()
        .inspect_err(|e| warn!(error = %e, "Rejecting events payload"))?;

    if let Some(grades) = grades {
        events.retain(|def| {
            def.grade
                .as_ref()
                .and_then(integral_grade)
                .is_some_and(|g| grades.contains(&g))
        });
    }

    debug!(
        received = entries.len(),
        kept = events.len(),
        calendar_type = %calendar_type,
        "Normalized event definitions"
    );

    Ok(EventsResponse {
        calendar_type,
        nation: nation.map(str::to_string),
        diocese: diocese.map(str::to_string),
        total_events: events.len(),
        filters_applied: EventsFiltersApplied {
            grade: grades.map(<[i64]>::to_vec),
        },
        events,
    })
}

/// Summarizes the upstream calendar listing.
///
/// # Errors
///
/// Returns [`NormalizeError::NoCalendarListing`] when `litcal_metadata` is
/// missing.
pub fn summarize_calendar_listing(raw: &Value) -> NormalizeResult<CalendarListing> {
    let metadata = raw
        .get(LISTING_METADATA_FIELD)
        .and_then(Value::as_object)
        .ok_or(NormalizeError::NoCalendarListing)?;

    let national_calendars: Vec<_> = array_field(metadata, "national_calendars")
        .filter_map(|entry| {
            Some(NationalCalendarSummary {
                calendar_id: entry.get("calendar_id")?.as_str()?.to_string(),
                locales: lenient_strings(entry.get("locales")),
            })
        })
        .collect();

    let diocesan_calendars: Vec<_> = array_field(metadata, "diocesan_calendars")
        .filter_map(|entry| {
            Some(DiocesanCalendarSummary {
                calendar_id: entry.get("calendar_id")?.as_str()?.to_string(),
                diocese: entry.get("diocese").and_then(Value::as_str).map(str::to_string),
                nation: entry.get("nation").and_then(Value::as_str).map(str::to_string),
                locales: lenient_strings(entry.get("locales")),
            })
        })
        .collect();

    Ok(CalendarListing {
        total_national_calendars: national_calendars.len(),
        total_diocesan_calendars: diocesan_calendars.len(),
        national_calendars,
        diocesan_calendars,
        locales: lenient_strings(metadata.get("locales")),
    })
}

fn canonical_event(entry: &RawEntry<'_>) -> NormalizeResult<CanonicalEvent> {
    let key = entry.label();
    let object = entry
        .value
        .as_object()
        .ok_or_else(|| NormalizeError::malformed(&key, "event must be an object"))?;

    let grade = grade_field(object, &key)?;
    Ok(CanonicalEvent {
        name: string_field(object, "name", &key)?
            .unwrap_or_else(|| UNKNOWN_EVENT_NAME.to_string()),
        date: object.get("date").and_then(parse_date_value),
        grade_name: grade
            .as_ref()
            .map_or(UNKNOWN_GRADE_NAME, grade_name_of)
            .to_string(),
        grade,
        color: string_list_field(object, "color", &key)?.unwrap_or_default(),
        common: string_list_field(object, "common", &key)?.unwrap_or_default(),
        liturgical_year: liturgical_year(object),
    })
}

fn event_definition(entry: &RawEntry<'_>) -> NormalizeResult<EventDefinition> {
    let event_key = entry
        .identifier()
        .ok_or_else(|| NormalizeError::malformed(entry.label(), "definition has no event_key"))?;
    let object = entry
        .value
        .as_object()
        .ok_or_else(|| NormalizeError::malformed(&event_key, "definition must be an object"))?;

    let grade = grade_field(object, &event_key)?;
    Ok(EventDefinition {
        name: string_field(object, "name", &event_key)?,
        grade_name: grade.as_ref().map(|g| grade_name_of(g).to_string()),
        grade,
        color: string_list_field(object, "color", &event_key)?,
        common: string_list_field(object, "common", &event_key)?,
        date: object.get("date").and_then(parse_date_value),
        liturgical_year: liturgical_year(object),
        event_key,
    })
}

/// Reads an optional string field. Present but non-string is malformed.
fn string_field(
    object: &Map<String, Value>,
    field: &str,
    key: &str,
) -> NormalizeResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(NormalizeError::malformed(
            key,
            format!("`{field}` must be a string"),
        )),
    }
}

/// Reads an optional list of strings. A lone string is a one-element list.
fn string_list_field(
    object: &Map<String, Value>,
    field: &str,
    key: &str,
) -> NormalizeResult<Option<Vec<String>>> {
    let malformed = || NormalizeError::malformed(key, format!("`{field}` must be a list of strings"));
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(vec![text.clone()])),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(malformed))
            .collect::<NormalizeResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(malformed()),
    }
}

/// Reads the grade. Any number is kept as sent; other types are malformed.
fn grade_field(object: &Map<String, Value>, key: &str) -> NormalizeResult<Option<Number>> {
    match object.get("grade") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(Some(number.clone())),
        Some(_) => Err(NormalizeError::malformed(key, "`grade` must be a number")),
    }
}

/// Cycle label. Numbers are written out; anything else that is not a string
/// counts as absent.
fn liturgical_year(object: &Map<String, Value>) -> Option<String> {
    match object.get("liturgical_year")? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn setting_str(settings: Option<&Value>, field: &str) -> Option<String> {
    settings?
        .get(field)?
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn setting_year(settings: Option<&Value>) -> Option<i64> {
    match settings?.get("year")? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn array_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> impl Iterator<Item = &'a Value> + 'a {
    object
        .get(field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn lenient_strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{parse_grade_filter, parse_month_filter};
    use serde_json::json;

    fn dates(response: &CalendarResponse) -> Vec<Option<String>> {
        response
            .events
            .iter()
            .map(|e| e.date.map(crate::date::format_date))
            .collect()
    }

    #[test]
    fn mixed_date_formats_in_array() {
        let raw = json!({
            "litcal": [
                {"name": "Mary, Mother of God", "date": "2026-01-01T00:00:00+00:00", "grade": 6},
                {"name": "Mary, Mother of God", "date": 1735689600, "grade": 6}
            ],
            "settings": {"locale": "en", "year": 2025}
        });

        let response = normalize_calendar_response(&raw, &Filters::new()).unwrap();
        assert_eq!(
            dates(&response),
            vec![Some("2025-01-01".to_string()), Some("2026-01-01".to_string())]
        );
        assert_eq!(response.metadata.total_events, 2);
        assert_eq!(response.metadata.locale.as_deref(), Some("en"));
        assert_eq!(response.metadata.year, Some(2025));
        assert_eq!(response.metadata.national_calendar, None);
    }

    #[test]
    fn mapping_is_equivalent_to_array() {
        let events = [
            json!({"name": "A", "date": "2026-03-01", "grade": 3}),
            json!({"name": "B", "date": "2026-03-02", "grade": 2}),
            json!({"name": "C", "date": "2026-03-03", "grade": 4}),
        ];
        let as_map = json!({"litcal": {"a": events[0], "b": events[1], "c": events[2]}});
        let as_array = json!({"litcal": events});

        let from_map = normalize_calendar_response(&as_map, &Filters::new()).unwrap();
        let from_array = normalize_calendar_response(&as_array, &Filters::new()).unwrap();

        assert_eq!(from_map.metadata.total_events, 3);
        assert_eq!(from_map, from_array);
    }

    #[test]
    fn missing_litcal() {
        let raw = json!({"settings": {"year": 2026}});
        assert_eq!(
            normalize_calendar_response(&raw, &Filters::new()),
            Err(NormalizeError::NoCalendarData)
        );
        assert_eq!(
            normalize_calendar_response(&json!(null), &Filters::new()),
            Err(NormalizeError::NoCalendarData)
        );
        assert_eq!(
            normalize_calendar_response(&json!({"litcal": "nope"}), &Filters::new()),
            Err(NormalizeError::NoCalendarData)
        );
    }

    #[test]
    fn month_and_grade_filters() {
        let raw = json!({"litcal": [
            {"name": "first", "date": "2026-01-05", "grade": 2},
            {"name": "second", "date": "2026-01-15", "grade": 3},
            {"name": "third", "date": "2026-01-20", "grade": 5},
            {"name": "fourth", "date": "2026-02-10", "grade": 2}
        ]});
        let filters = Filters::new()
            .with_month(Some(1))
            .with_grades(Some(vec![2, 3]));

        let response = normalize_calendar_response(&raw, &filters).unwrap();
        let names: Vec<_> = response.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(response.metadata.filters_applied.month, Some(1));
        assert_eq!(response.metadata.filters_applied.grades, Some(vec![2, 3]));
    }

    #[test]
    fn unparseable_grade_filter_keeps_month_events() {
        let raw = json!({"litcal": [
            {"name": "a", "date": "2026-01-05", "grade": 2},
            {"name": "b", "date": "2026-01-20", "grade": 7},
            {"name": "c", "date": "2026-02-10", "grade": 2}
        ]});
        let filters = Filters::new()
            .with_month(parse_month_filter(Some("1")))
            .with_grades(parse_grade_filter(Some(&json!("abc,def"))));

        let response = normalize_calendar_response(&raw, &filters).unwrap();
        assert_eq!(response.metadata.total_events, 2);
        assert_eq!(response.metadata.filters_applied.grades, None);
    }

    #[test]
    fn undated_events_sort_last_and_skip_month_filter() {
        let raw = json!({"litcal": [
            {"name": "undated-1", "grade": 1},
            {"name": "late", "date": "2026-12-25", "grade": 6},
            {"name": "undated-2", "date": "garbage", "grade": 7},
            {"name": "early", "date": "2026-01-01", "grade": 6}
        ]});

        let all = normalize_calendar_response(&raw, &Filters::new()).unwrap();
        let names: Vec<_> = all.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late", "undated-1", "undated-2"]);

        let december = normalize_calendar_response(&raw, &Filters::new().with_month(Some(12)))
            .unwrap();
        assert_eq!(december.metadata.total_events, 1);
    }

    #[test]
    fn same_day_orders_by_descending_grade() {
        let raw = json!({"litcal": [
            {"name": "weekday", "date": "2026-04-05", "grade": 0},
            {"name": "easter", "date": "2026-04-05", "grade": 7},
            {"name": "memorial", "date": "2026-04-05", "grade": 3}
        ]});
        let response = normalize_calendar_response(&raw, &Filters::new()).unwrap();
        let names: Vec<_> = response.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["easter", "memorial", "weekday"]);
    }

    #[test]
    fn defaults_for_absent_fields() {
        let raw = json!({"litcal": [{"date": "2026-06-01", "grade": 12}]});
        let response = normalize_calendar_response(&raw, &Filters::new()).unwrap();
        let event = &response.events[0];
        assert_eq!(event.name, "Unknown");
        assert_eq!(event.grade, Some(Number::from(12)));
        assert_eq!(event.grade_name, "Unknown");
        assert!(event.color.is_empty());
        assert!(event.common.is_empty());
        assert_eq!(event.liturgical_year, None);
    }

    #[test]
    fn fractional_grade_and_numeric_year_still_normalize() {
        let raw = json!({"litcal": [
            {"name": "Solemn", "date": "2026-05-01", "grade": 6, "liturgical_year": 2026},
            {"name": "Odd", "date": "2026-05-01", "grade": 3.5, "liturgical_year": ["A"]}
        ]});
        let response = normalize_calendar_response(&raw, &Filters::new()).unwrap();
        assert_eq!(response.events.len(), 2);

        let solemn = &response.events[0];
        assert_eq!(solemn.grade_name, "Solemnity");
        assert_eq!(solemn.liturgical_year.as_deref(), Some("2026"));

        let odd = &response.events[1];
        assert_eq!(odd.grade, Number::from_f64(3.5));
        assert_eq!(odd.grade_name, "Unknown");
        assert_eq!(odd.liturgical_year, None);
        let rendered = serde_json::to_value(odd).unwrap();
        assert_eq!(rendered["grade"], json!(3.5));

        let filters = Filters::new().with_grades(Some(vec![3]));
        let response = normalize_calendar_response(&raw, &filters).unwrap();
        assert!(response.events.is_empty());
    }

    #[test]
    fn fractional_grade_definition_is_kept() {
        let raw = json!({"litcal_events": [
            {"event_key": "Odd", "name": "Odd", "grade": 2.5, "liturgical_year": 1}
        ]});
        let response =
            normalize_events_response(&raw, CalendarType::General, None, None, Some(&[2])).unwrap();
        assert!(response.events.is_empty());

        let response =
            normalize_events_response(&raw, CalendarType::General, None, None, None).unwrap();
        assert_eq!(response.events[0].grade, Number::from_f64(2.5));
        assert_eq!(response.events[0].grade_name.as_deref(), Some("Unknown"));
        assert_eq!(response.events[0].liturgical_year.as_deref(), Some("1"));
    }

    #[test]
    fn malformed_event_reports_key() {
        let raw = json!({"litcal": {
            "Easter": {"name": "Easter", "date": "2026-04-05", "grade": 7},
            "Broken": {"name": "Broken", "date": "2026-04-06", "grade": "high"}
        }});
        let err = normalize_calendar_response(&raw, &Filters::new()).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::malformed("Broken", "`grade` must be a number")
        );

        let raw = json!({"litcal": [42]});
        let err = normalize_calendar_response(&raw, &Filters::new()).unwrap_err();
        assert_eq!(err, NormalizeError::malformed("#0", "event must be an object"));
    }

    #[test]
    fn normalization_is_idempotent_and_sort_is_stable() {
        let raw = json!({"litcal": {
            "b": {"name": "b", "date": 1767225600, "grade": 3, "color": ["white"]},
            "a": {"name": "a", "date": "2026-01-01", "grade": 3, "color": "green"},
            "c": {"name": "c"}
        }, "settings": {"locale": "la", "national_calendar": "IT"}});
        let filters = Filters::new().with_grades(Some(vec![3]));

        let first = normalize_calendar_response(&raw, &filters).unwrap();
        let second = normalize_calendar_response(&raw, &filters).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let mut resorted = first.events.clone();
        resorted.sort_by(CanonicalEvent::chronological);
        assert_eq!(resorted, first.events);
    }

    #[test]
    fn calendar_output_shape() {
        let raw = json!({
            "litcal": [{
                "event_key": "StJoseph",
                "name": "Saint Joseph, Spouse of the Blessed Virgin Mary",
                "date": 1773878400,
                "grade": 6,
                "color": ["white"],
                "common": [],
                "liturgical_year": "YEAR A"
            }],
            "settings": {"locale": "en", "year": 2026, "national_calendar": "US"}
        });
        let response = normalize_calendar_response(&raw, &Filters::new()).unwrap();

        insta::assert_json_snapshot!(response, @r#"
        {
          "metadata": {
            "locale": "en",
            "national_calendar": "US",
            "diocesan_calendar": null,
            "year": 2026,
            "total_events": 1,
            "filters_applied": {
              "month": null,
              "grade": null
            }
          },
          "events": [
            {
              "name": "Saint Joseph, Spouse of the Blessed Virgin Mary",
              "date": "2026-03-19",
              "grade": 6,
              "grade_name": "Solemnity",
              "color": [
                "white"
              ],
              "common": [],
              "liturgical_year": "YEAR A"
            }
          ]
        }
        "#);
    }

    #[test]
    fn event_definitions_from_mapping() {
        let raw = json!({"litcal_events": {
            "StJoseph": {"name": "Saint Joseph", "grade": 6, "color": ["white"]},
            "Advent1": {"name": "First Sunday of Advent", "grade": 7},
            "NoGrade": {"name": "Something"}
        }});

        let response =
            normalize_events_response(&raw, CalendarType::General, None, None, None).unwrap();
        assert_eq!(response.total_events, 3);
        assert_eq!(response.events[0].event_key, "StJoseph");
        assert_eq!(response.events[0].grade_name.as_deref(), Some("Solemnity"));
        assert_eq!(response.events[2].grade, None);
        assert_eq!(response.events[2].grade_name, None);
        assert_eq!(response.events[2].color, None);
        assert_eq!(response.events[2].common, None);
    }

    #[test]
    fn event_definitions_grade_filter_skips_ungraded() {
        let raw = json!({"litcal_events": [
            {"event_key": "StJoseph", "name": "Saint Joseph", "grade": 6},
            {"event_key": "StBlaise", "name": "Saint Blaise", "grade": 2},
            {"event_key": "Mystery"}
        ]});

        let response = normalize_events_response(
            &raw,
            CalendarType::National,
            Some("IT"),
            None,
            Some(&[2, 6][..]),
        )
        .unwrap();
        let keys: Vec<_> = response.events.iter().map(|e| e.event_key.as_str()).collect();
        assert_eq!(keys, vec!["StJoseph", "StBlaise"]);
        assert_eq!(response.nation.as_deref(), Some("IT"));
        assert_eq!(response.filters_applied.grade, Some(vec![2, 6]));
        assert_eq!(response.events[0].name.as_deref(), Some("Saint Joseph"));
    }

    #[test]
    fn event_definitions_missing() {
        assert_eq!(
            normalize_events_response(&json!({}), CalendarType::General, None, None, None),
            Err(NormalizeError::NoEventDefinitions)
        );
        let unkeyed = json!({"litcal_events": [{"name": "x"}]});
        assert!(matches!(
            normalize_events_response(&unkeyed, CalendarType::General, None, None, None),
            Err(NormalizeError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn listing_summary() {
        let raw = json!({"litcal_metadata": {
            "national_calendars": [
                {"calendar_id": "IT", "locales": ["it_IT"]},
                {"calendar_id": "US", "locales": ["en_US", "es_US"]},
                {"locales": ["xx"]}
            ],
            "diocesan_calendars": [
                {"calendar_id": "romamo_it", "diocese": "Diocesi di Roma", "nation": "IT", "locales": ["it_IT"]}
            ],
            "locales": ["en", "it", "la"]
        }});

        let listing = summarize_calendar_listing(&raw).unwrap();
        assert_eq!(listing.total_national_calendars, 2);
        assert_eq!(listing.total_diocesan_calendars, 1);
        assert_eq!(listing.national_calendars[1].locales, vec!["en_US", "es_US"]);
        assert_eq!(listing.diocesan_calendars[0].nation.as_deref(), Some("IT"));
        assert_eq!(listing.locales, vec!["en", "it", "la"]);

        assert_eq!(
            summarize_calendar_listing(&json!({"calendars": []})),
            Err(NormalizeError::NoCalendarListing)
        );
    }
}
