//! Core types: dates, grades, filters, canonical events, normalization

pub mod date;
pub mod error;
pub mod event;
pub mod filter;
pub mod grade;
pub mod normalize;
pub mod tracing;

pub use date::{DATE_FORMAT, format_date, normalize_date, parse_date_value};
pub use error::{NormalizeError, NormalizeResult, ValidationError, ValidationResult};
pub use event::{
    CalendarListing, CalendarMetadata, CalendarResponse, CalendarType, CanonicalEvent,
    DiocesanCalendarSummary, EventDefinition, EventsFiltersApplied, EventsResponse,
    NationalCalendarSummary,
};
pub use filter::{
    Filters, MAX_YEAR, MIN_YEAR, parse_grade_filter, parse_month_filter, validate_year,
    validate_year_or,
};
pub use grade::{Grade, grade_name, grade_name_of, integral_grade, is_valid_grade};
pub use normalize::{
    normalize_calendar_response, normalize_events_response, summarize_calendar_listing,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
