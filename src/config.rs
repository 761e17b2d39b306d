//! Source configuration
//!
//! The connector is configured with a flat JSON object. Four keys are
//! required (`email`, `api_token`, `subdomain`, `start_date`); the rest tune
//! the HTTP layer and default sensibly.

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Base URL template used when the config does not override it
pub const DEFAULT_BASE_URL: &str = "https://{{ config.subdomain }}.zendesk.com/api/sunshine";

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Parsed connector configuration
#[derive(Debug, Clone, Serialize)]
pub struct SourceConfig {
    /// Account email used for API token authentication
    pub email: String,
    /// API token
    #[serde(skip_serializing)]
    pub api_token: String,
    /// Tenant identifier (`{subdomain}.zendesk.com`)
    pub subdomain: String,
    /// Lower bound for incremental filtering, unparsed
    pub start_date: String,
    /// Base URL template override
    pub base_url: Option<String>,
    /// Client-side request pacing
    pub requests_per_second: Option<u32>,
    /// Records per page
    pub page_size: u32,
}

impl SourceConfig {
    /// Build a config from a JSON object.
    ///
    /// Only key presence is validated here; `start_date` is checked by
    /// [`parse_start_date`] when a connection is tested or records are read.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::config("Config must be a JSON object"));
        }

        let page_size = match optional_u32(value, "page_size")? {
            Some(0) => {
                return Err(Error::invalid_value(
                    "page_size",
                    "must be greater than zero",
                ))
            }
            Some(size) => size,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            email: required_str(value, "email")?,
            api_token: required_str(value, "api_token")?,
            subdomain: required_str(value, "subdomain")?,
            start_date: required_str(value, "start_date")?,
            base_url: value
                .get("base_url")
                .and_then(Value::as_str)
                .map(String::from)
                .none_if_empty(),
            requests_per_second: optional_u32(value, "requests_per_second")?,
            page_size,
        })
    }

    /// Credential for API token basic auth
    pub fn credential(&self) -> Credential {
        Credential::api_token(&self.email, &self.api_token)
    }

    /// Base URL template (may contain `{{ config.* }}` variables)
    pub fn base_url_template(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Strictly parse the configured start date
    pub fn parsed_start_date(&self) -> Result<DateTime<Utc>> {
        parse_start_date(&self.start_date)
    }
}

fn required_str(value: &Value, field: &str) -> Result<String> {
    match value.get(field) {
        None | Some(Value::Null) => Err(Error::missing_field(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::invalid_value(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}

fn optional_u32(value: &Value, field: &str) -> Result<Option<u32>> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| Error::invalid_value(field, format!("expected a positive integer, got {v}"))),
    }
}

/// Strict ISO-8601 parse of a start date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as
/// UTC) and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_start_date(raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| {
        Error::invalid_value(
            "start_date",
            format!("'{raw}' is not a valid ISO-8601 date or timestamp"),
        )
    })
}

/// Parse an ISO-8601 timestamp, returning None if it does not parse
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Config schema (for `spec`)
// ============================================================================

/// Configuration field definition
#[derive(Debug, Clone)]
pub struct ConfigField {
    pub name: &'static str,
    pub field_type: &'static str,
    pub required: bool,
    pub secret: bool,
    pub description: &'static str,
    pub default: Option<&'static str>,
}

/// Every key the source understands
pub const CONFIG_FIELDS: &[ConfigField] = &[
    ConfigField {
        name: "email",
        field_type: "string",
        required: true,
        secret: false,
        description: "Email of the account the API token belongs to",
        default: None,
    },
    ConfigField {
        name: "api_token",
        field_type: "string",
        required: true,
        secret: true,
        description: "Zendesk API token",
        default: None,
    },
    ConfigField {
        name: "subdomain",
        field_type: "string",
        required: true,
        secret: false,
        description: "Account subdomain, e.g. 'acme' for acme.zendesk.com",
        default: None,
    },
    ConfigField {
        name: "start_date",
        field_type: "string",
        required: true,
        secret: false,
        description: "ISO-8601 date or timestamp; records updated before it are skipped",
        default: None,
    },
    ConfigField {
        name: "base_url",
        field_type: "string",
        required: false,
        secret: false,
        description: "Override for the API base URL",
        default: Some(DEFAULT_BASE_URL),
    },
    ConfigField {
        name: "requests_per_second",
        field_type: "integer",
        required: false,
        secret: false,
        description: "Client-side request rate limit",
        default: None,
    },
    ConfigField {
        name: "page_size",
        field_type: "integer",
        required: false,
        secret: false,
        description: "Records requested per page",
        default: Some("100"),
    },
];

/// Render the config schema as a JSON schema object
pub fn connection_specification() -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for field in CONFIG_FIELDS {
        let mut prop = serde_json::json!({
            "type": field.field_type,
            "description": field.description,
        });
        if field.secret {
            prop["airbyte_secret"] = Value::Bool(true);
        }
        if let Some(default) = field.default {
            prop["default"] = Value::String(default.to_string());
        }
        properties.insert(field.name.to_string(), prop);
        if field.required {
            required.push(field.name);
        }
    }

    serde_json::json!({
        "type": "object",
        "title": "Zendesk Sunshine Spec",
        "required": required,
        "properties": properties,
        "additionalProperties": true
    })
}
