//! Tool names and their input schemas.

use std::fmt;

use litcal_protocol::ToolSchema;
use serde_json::{Value, json};

/// The tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    GeneralCalendar,
    NationalCalendar,
    DiocesanCalendar,
    ListCalendars,
    LiturgicalEvents,
}

impl Tool {
    /// All tools, in listing order.
    pub const ALL: [Tool; 5] = [
        Tool::GeneralCalendar,
        Tool::NationalCalendar,
        Tool::DiocesanCalendar,
        Tool::ListCalendars,
        Tool::LiturgicalEvents,
    ];

    /// Looks up a tool by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GeneralCalendar => "get_general_calendar",
            Self::NationalCalendar => "get_national_calendar",
            Self::DiocesanCalendar => "get_diocesan_calendar",
            Self::ListCalendars => "list_available_calendars",
            Self::LiturgicalEvents => "get_liturgical_events",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::GeneralCalendar => {
                "Get the General Roman Calendar for a year, optionally filtered by month and grade"
            }
            Self::NationalCalendar => {
                "Get the liturgical calendar of a nation for a year, optionally filtered by month and grade"
            }
            Self::DiocesanCalendar => {
                "Get the liturgical calendar of a diocese for a year, optionally filtered by month and grade"
            }
            Self::ListCalendars => "List the national and diocesan calendars and locales available",
            Self::LiturgicalEvents => {
                "List every liturgical event that can occur in a general, national or diocesan calendar"
            }
        }
    }

    fn input_schema(self) -> Value {
        match self {
            Self::GeneralCalendar => json_schema_object(calendar_properties(None), &[]),
            Self::NationalCalendar => json_schema_object(
                calendar_properties(Some((
                    "nation",
                    json_schema_string("Nation code, e.g. IT, US, NL"),
                ))),
                &["nation"],
            ),
            Self::DiocesanCalendar => json_schema_object(
                calendar_properties(Some((
                    "diocese",
                    json_schema_string("Diocese identifier, e.g. romamo_it"),
                ))),
                &["diocese"],
            ),
            Self::ListCalendars => json_schema_object(json!({}), &[]),
            Self::LiturgicalEvents => json_schema_object(
                json!({
                    "calendarType": {
                        "type": "string",
                        "enum": ["general", "national", "diocesan"],
                        "description": "Which calendar's events to list (default: general)"
                    },
                    "nation": json_schema_string("Nation code, required for national calendars"),
                    "diocese": json_schema_string("Diocese identifier, required for diocesan calendars"),
                    "locale": json_schema_string("Locale for event names, e.g. en, it, la"),
                    "grade": grade_schema(),
                }),
                &[],
            ),
        }
    }

    /// Returns the schema advertised by `tools/list`.
    pub fn schema(self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schemas of every tool, in listing order.
pub fn tool_schemas() -> Vec<ToolSchema> {
    Tool::ALL.into_iter().map(Tool::schema).collect()
}

fn calendar_properties(extra: Option<(&str, Value)>) -> Value {
    let mut properties = serde_json::Map::new();
    if let Some((name, schema)) = extra {
        properties.insert(name.to_string(), schema);
    }
    properties.insert(
        "year".to_string(),
        json!({
            "type": ["integer", "string"],
            "description": "Calendar year between 1970 and 9999 (default: current year)"
        }),
    );
    properties.insert(
        "locale".to_string(),
        json_schema_string("Locale for event names, e.g. en, it, la"),
    );
    properties.insert(
        "month".to_string(),
        json!({
            "type": ["integer", "string"],
            "description": "Only return events in this month (1-12)"
        }),
    );
    properties.insert("grade".to_string(), grade_schema());
    Value::Object(properties)
}

fn grade_schema() -> Value {
    json!({
        "type": ["integer", "string"],
        "description": "Only return events of these grades: a number 0-7 or a comma-separated list such as \"3,4\". \
            0 Weekday, 1 Commemoration, 2 Optional Memorial, 3 Memorial, 4 Feast, 5 Feast of the Lord, \
            6 Solemnity, 7 Higher Solemnity"
    })
}

fn json_schema_object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}
