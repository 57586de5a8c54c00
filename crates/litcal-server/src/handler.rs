//! Tool invocation dispatch.
//!
//! [`ToolDispatcher::call`] turns a tool name plus raw arguments into a
//! [`CallToolResult`]. Every failure is rendered as the JSON text
//! `{"error": "<message>"}`; only an unknown tool also sets `isError`.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Value, json};
use tracing::{Span, debug, info, warn};

use litcal_core::{
    CalendarType, Filters, ValidationError, normalize_calendar_response, normalize_events_response,
    parse_grade_filter, parse_month_filter, summarize_calendar_listing, validate_year,
};
use litcal_protocol::CallToolResult;
use litcal_upstream::{CalendarRequest, CalendarSource, EventsScope};

use crate::cache::ResponseCache;
use crate::config::ServerConfig;
use crate::error::ToolError;
use crate::tools::Tool;

/// Arguments accepted by the tools. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToolArguments {
    #[serde(deserialize_with = "scalar_string")]
    year: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    locale: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    month: Option<String>,
    grade: Option<Value>,
    #[serde(deserialize_with = "scalar_string")]
    nation: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    diocese: Option<String>,
    #[serde(rename = "calendarType", deserialize_with = "scalar_string")]
    calendar_type: Option<String>,
}

/// Accepts a string or a number; blank strings are absent.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let text = text.trim();
            Ok((!text.is_empty()).then(|| text.to_string()))
        }
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

impl ToolArguments {
    fn parse(arguments: Option<&Value>) -> Result<Self, ToolError> {
        match arguments {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) if !value.is_object() => Err(ToolError::InvalidArguments(
                "arguments must be an object".to_string(),
            )),
            Some(value) => Self::deserialize(value)
                .map_err(|e| ToolError::InvalidArguments(e.to_string())),
        }
    }

    fn filters(&self) -> Filters {
        Filters::new()
            .with_month(parse_month_filter(self.month.as_deref()))
            .with_grades(parse_grade_filter(self.grade.as_ref()))
    }

    fn nation(&self) -> Result<String, ValidationError> {
        self.nation
            .as_deref()
            .map(str::to_ascii_uppercase)
            .ok_or(ValidationError::MissingNation)
    }

    fn diocese(&self) -> Result<String, ValidationError> {
        self.diocese.clone().ok_or(ValidationError::MissingDiocese)
    }
}

/// Routes tool calls to the upstream source and the normalizers.
pub struct ToolDispatcher {
    source: Arc<dyn CalendarSource>,
    cache: ResponseCache,
    config: ServerConfig,
}

impl ToolDispatcher {
    /// Creates a dispatcher with a cache built from `config`.
    pub fn new(source: Arc<dyn CalendarSource>, config: ServerConfig) -> Self {
        let cache = if config.cache_enabled {
            ResponseCache::new(config.cache_ttl)
        } else {
            ResponseCache::disabled()
        };
        Self::with_cache(source, config, cache)
    }

    /// Creates a dispatcher with an explicit cache.
    pub fn with_cache(
        source: Arc<dyn CalendarSource>,
        config: ServerConfig,
        cache: ResponseCache,
    ) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Invokes a tool by name.
    #[tracing::instrument(skip(self, arguments), fields(duration_ms))]
    pub async fn call(&self, name: &str, arguments: Option<&Value>) -> CallToolResult {
        let start = std::time::Instant::now();

        let Some(tool) = Tool::from_name(name) else {
            warn!(tool = %name, "Unknown tool requested");
            let message = format!("Unknown tool: {name}");
            return CallToolResult::error(json!({ "error": message }).to_string());
        };

        info!(tool = %tool, "Calling tool");
        debug!(arguments = ?arguments, "Tool arguments");

        let text = match self.dispatch(tool, arguments).await {
            Ok(text) => text,
            Err(e) => {
                debug!(tool = %tool, error = %e, "Tool call failed");
                json!({ "error": e.to_string() }).to_string()
            }
        };

        let duration = start.elapsed();
        Span::current().record("duration_ms", duration.as_millis());
        debug!(duration_ms = duration.as_millis(), "Tool call handled");

        CallToolResult::text(text)
    }

    async fn dispatch(&self, tool: Tool, arguments: Option<&Value>) -> Result<String, ToolError> {
        let args = ToolArguments::parse(arguments)?;
        match tool {
            Tool::GeneralCalendar => {
                let year = validate_year(args.year.as_deref())?;
                let request = CalendarRequest::General {
                    year,
                    locale: self.locale(&args),
                };
                self.calendar(request, &args.filters()).await
            }
            Tool::NationalCalendar => {
                let nation = args.nation()?;
                let year = validate_year(args.year.as_deref())?;
                let request = CalendarRequest::National {
                    nation,
                    year,
                    locale: self.locale(&args),
                };
                self.calendar(request, &args.filters()).await
            }
            Tool::DiocesanCalendar => {
                let diocese = args.diocese()?;
                let year = validate_year(args.year.as_deref())?;
                let request = CalendarRequest::Diocesan {
                    diocese,
                    year,
                    locale: self.locale(&args),
                };
                self.calendar(request, &args.filters()).await
            }
            Tool::ListCalendars => {
                let raw = self.fetch(CalendarRequest::Calendars).await?;
                render(&summarize_calendar_listing(&raw)?)
            }
            Tool::LiturgicalEvents => self.events(&args).await,
        }
    }

    async fn calendar(&self, request: CalendarRequest, filters: &Filters) -> Result<String, ToolError> {
        let raw = self.fetch(request).await?;
        render(&normalize_calendar_response(&raw, filters)?)
    }

    async fn events(&self, args: &ToolArguments) -> Result<String, ToolError> {
        let calendar_type = args
            .calendar_type
            .as_deref()
            .map(str::parse::<CalendarType>)
            .transpose()?
            .unwrap_or_default();

        let (scope, nation, diocese) = match calendar_type {
            CalendarType::General => (EventsScope::General, None, None),
            CalendarType::National => {
                let nation = args.nation()?;
                (EventsScope::Nation(nation.clone()), Some(nation), None)
            }
            CalendarType::Diocesan => {
                let diocese = args.diocese()?;
                (EventsScope::Diocese(diocese.clone()), None, Some(diocese))
            }
        };

        let raw = self
            .fetch(CalendarRequest::Events {
                scope,
                locale: self.locale(args),
            })
            .await?;
        let grades = parse_grade_filter(args.grade.as_ref());
        let response = normalize_events_response(
            &raw,
            calendar_type,
            nation.as_deref(),
            diocese.as_deref(),
            grades.as_deref(),
        )?;
        render(&response)
    }

    async fn fetch(&self, request: CalendarRequest) -> Result<Arc<Value>, ToolError> {
        let key = request.cache_key();
        let raw = self
            .cache
            .get_or_fetch(&key, || self.source.fetch(request))
            .await?;
        Ok(raw)
    }

    fn locale(&self, args: &ToolArguments) -> String {
        args.locale
            .clone()
            .unwrap_or_else(|| self.config.default_locale.clone())
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(value)?)
}
