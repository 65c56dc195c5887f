//! Alert message formatting.
//!
//! Renders a Grafana/Alertmanager webhook payload as a WhatsApp text message
//! using WhatsApp's `*bold*` markup:
//!
//! ```text
//! 🚨 *ALERT FIRING* 🚨
//!
//! *Alert*: HighCPU
//! *Resource*: prod/api-0
//! *Summary*: CPU above 90%
//! *Started*: 2024-01-15 10:30:00 UTC
//! *Link*: https://grafana.example.com/alerting/1
//!
//! *Grafana*: https://grafana.example.com
//! ```

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::error::FormatError;

const UNKNOWN_STATUS: &str = "unknown";
const UNKNOWN_ALERT: &str = "Unknown Alert";
const NOT_AVAILABLE: &str = "N/A";
const NO_DETAILS: &str = "No details available";

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Date-time layouts without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Read-only view of a webhook payload.
#[derive(Debug, Deserialize)]
struct AlertPayload {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    alerts: Vec<AlertEntry>,
    #[serde(default, rename = "externalURL")]
    external_url: Option<String>,
}

/// Read-only view of a single alert in a webhook payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertEntry {
    #[serde(default)]
    labels: Map<String, Value>,
    #[serde(default)]
    annotations: Map<String, Value>,
    #[serde(default)]
    starts_at: Option<String>,
    #[serde(default, rename = "generatorURL")]
    generator_url: Option<String>,
}

impl AlertEntry {
    fn push_lines(&self, lines: &mut Vec<String>) {
        let name = field_text(&self.labels, "alertname", UNKNOWN_ALERT);
        lines.push(format!("\n*Alert*: {name}"));

        let namespace = field_text(&self.labels, "namespace", NOT_AVAILABLE);
        let pod = field_text(&self.labels, "pod", NOT_AVAILABLE);
        lines.push(format!("*Resource*: {namespace}/{pod}"));

        let summary = field_text(&self.annotations, "summary", NO_DETAILS);
        lines.push(format!("*Summary*: {summary}"));

        if let Some(starts_at) = non_empty(self.starts_at.as_deref()) {
            lines.push(format!("*Started*: {}", format_timestamp(starts_at)));
        }

        if let Some(url) = non_empty(self.generator_url.as_deref()) {
            lines.push(format!("*Link*: {url}"));
        }
    }
}

/// Formats an alert payload, failing if it cannot be read as one.
///
/// # Errors
///
/// Returns [`FormatError::Payload`] if the payload is not shaped like an
/// alert webhook, e.g. `alerts` is not a sequence or `labels` is not a map.
pub fn format_alert(value: &Value) -> Result<String, FormatError> {
    let payload = AlertPayload::deserialize(value)?;

    let mut lines = Vec::with_capacity(2 + payload.alerts.len() * 5);
    lines.push(format!(
        "🚨 *ALERT {}* 🚨",
        status_label(payload.status.as_deref())
    ));

    for alert in &payload.alerts {
        alert.push_lines(&mut lines);
    }

    if let Some(url) = non_empty(payload.external_url.as_deref()) {
        lines.push(format!("\n*Grafana*: {url}"));
    }

    Ok(lines.join("\n"))
}

/// Formats an alert payload, never failing.
///
/// Payloads that [`format_alert`] rejects are logged and replaced with
/// [`fallback_message`].
#[must_use]
pub fn render_alert(value: &Value) -> String {
    format_alert(value).unwrap_or_else(|err| {
        error!(error = %err, "error formatting alert message");
        fallback_message(value)
    })
}

/// The one-line message sent when an alert payload cannot be formatted.
#[must_use]
pub fn fallback_message(value: &Value) -> String {
    let status = value.get("status").and_then(Value::as_str);
    format!(
        "Alert {}: Error processing alert details. Please check Grafana.",
        status_label(status)
    )
}

/// Renders an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Offsets are converted to UTC, so `12:30:00+02:00` renders as
/// `10:30:00 UTC` rather than keeping the local clock time under a UTC label.
/// Values without an offset are taken as UTC. Anything that does not parse
/// is returned unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |time| time.format(DISPLAY_TIME_FORMAT).to_string(),
    )
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(time) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(time.with_timezone(&Utc));
    }
    if let Some(time) = NAIVE_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
    {
        return Some(time.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|time| time.and_utc())
}

fn status_label(status: Option<&str>) -> String {
    status.unwrap_or(UNKNOWN_STATUS).to_uppercase()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn field_text<'a>(map: &'a Map<String, Value>, key: &str, placeholder: &'a str) -> Cow<'a, str> {
    match map.get(key) {
        None | Some(Value::Null) => Cow::Borrowed(placeholder),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
    }
}
