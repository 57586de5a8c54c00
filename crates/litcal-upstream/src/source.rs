//! CalendarSource trait definition.
//!
//! A [`CalendarSource`] answers a [`CalendarRequest`] with the raw upstream
//! JSON. Normalization happens elsewhere; sources never reshape payloads.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::UpstreamResult;

/// A boxed future for async trait methods.
///
/// Keeps [`CalendarSource`] object-safe so it can sit behind an `Arc<dyn _>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Which events catalogue to list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventsScope {
    /// Events of the General Roman Calendar.
    General,
    /// Events of a national calendar.
    Nation(String),
    /// Events of a diocesan calendar.
    Diocese(String),
}

/// One logical upstream endpoint call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalendarRequest {
    /// General Roman Calendar for a year.
    General { year: i32, locale: String },
    /// National calendar for a year.
    National {
        nation: String,
        year: i32,
        locale: String,
    },
    /// Diocesan calendar for a year.
    Diocesan {
        diocese: String,
        year: i32,
        locale: String,
    },
    /// Listing of every available calendar.
    Calendars,
    /// Event-definition catalogue.
    Events { scope: EventsScope, locale: String },
}

impl CalendarRequest {
    /// Path relative to the API root, with path segments percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::General { year, .. } => format!("/calendar/{year}"),
            Self::National { nation, year, .. } => {
                format!("/calendar/nation/{}/{year}", urlencoding::encode(nation))
            }
            Self::Diocesan { diocese, year, .. } => {
                format!("/calendar/diocese/{}/{year}", urlencoding::encode(diocese))
            }
            Self::Calendars => "/calendars".to_string(),
            Self::Events { scope, .. } => match scope {
                EventsScope::General => "/events".to_string(),
                EventsScope::Nation(nation) => {
                    format!("/events/nation/{}", urlencoding::encode(nation))
                }
                EventsScope::Diocese(diocese) => {
                    format!("/events/diocese/{}", urlencoding::encode(diocese))
                }
            },
        }
    }

    /// Locale sent as `Accept-Language`, if the endpoint is localized.
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::General { locale, .. }
            | Self::National { locale, .. }
            | Self::Diocesan { locale, .. }
            | Self::Events { locale, .. } => Some(locale.as_str()),
            Self::Calendars => None,
        }
    }

    /// Cache key covering every parameter that changes the response.
    pub fn cache_key(&self) -> String {
        match self.locale() {
            Some(locale) => format!("{}?locale={locale}", self.path()),
            None => self.path(),
        }
    }
}

impl fmt::Display for CalendarRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

/// A source of raw liturgical-calendar payloads.
///
/// # Example Implementation
///
/// ```ignore
/// struct Fixture(serde_json::Value);
///
/// impl CalendarSource for Fixture {
///     fn name(&self) -> &str { "fixture" }
///
///     fn fetch(&self, _request: CalendarRequest) -> BoxFuture<'_, UpstreamResult<Value>> {
///         Box::pin(async move { Ok(self.0.clone()) })
///     }
/// }
/// ```
pub trait CalendarSource: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &str;

    /// Performs one upstream call and returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` on timeout, transport failure, non-success
    /// status, or a body that is not JSON.
    fn fetch(&self, request: CalendarRequest) -> BoxFuture<'_, UpstreamResult<Value>>;
}
