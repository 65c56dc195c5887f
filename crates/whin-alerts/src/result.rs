//! Result records reported back to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// Outcome of a processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// The step completed.
    Success,
    /// The step failed.
    Error,
}

impl ResultStatus {
    /// Returns the status as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handing a message to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    /// Whether the message was accepted.
    pub status: ResultStatus,
    /// Human-readable description.
    pub message: String,
    /// Extra information, such as the relay's response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SendResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Success,
            message: message.into(),
            details: None,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: message.into(),
            details: None,
        }
    }

    /// Sets the details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Returns true if the send failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ResultStatus::Error
    }
}

impl From<RelayError> for SendResult {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::ApiStatus { status, body } => {
                Self::error(format!("API error: {status}")).with_details(body)
            }
            other => Self::error(other.to_string()),
        }
    }
}

/// Final result of processing one payload.
///
/// Serialized as the JSON document printed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Overall outcome.
    pub status: ResultStatus,
    /// Human-readable description.
    pub message: String,
    /// Extra information about a failed send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// The text sent to the relay, for alert payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_alert: Option<String>,
    /// The original payload, for messages that are not alerts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProcessResult {
    /// Creates a failed result with no attachments.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: message.into(),
            details: None,
            formatted_alert: None,
            data: None,
        }
    }

    /// Creates the result for an alert that was formatted and sent.
    #[must_use]
    pub fn sent(send: SendResult, formatted_alert: String) -> Self {
        Self {
            status: send.status,
            message: send.message,
            details: send.details,
            formatted_alert: Some(formatted_alert),
            data: None,
        }
    }

    /// Creates the result for a message that was not an alert.
    #[must_use]
    pub fn passed_through(data: Value) -> Self {
        Self {
            status: ResultStatus::Success,
            message: "Message processed successfully (not an alert)".to_string(),
            details: None,
            formatted_alert: None,
            data: Some(data),
        }
    }

    /// Returns true if processing failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == ResultStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod send_result_tests {
        use super::*;

        #[test]
        fn from_api_status_keeps_body() {
            let result = SendResult::from(RelayError::ApiStatus {
                status: 429,
                body: "{\"message\":\"rate limited\"}".to_string(),
            });

            assert!(result.is_error());
            assert_eq!(result.message, "API error: 429");
            assert_eq!(
                result.details.as_deref(),
                Some("{\"message\":\"rate limited\"}")
            );
        }

        #[test]
        fn from_missing_credential() {
            let result = SendResult::from(RelayError::MissingCredential);

            assert!(result.is_error());
            assert_eq!(result.message, "API key not configured");
            assert!(result.details.is_none());
        }

        #[test]
        fn from_transport() {
            let result = SendResult::from(RelayError::Transport("dns error".to_string()));
            assert_eq!(result.message, "Error: dns error");
        }
    }

    mod process_result_tests {
        use super::*;

        #[test]
        fn error_serializes_without_attachments() {
            let value = serde_json::to_value(ProcessResult::error("Empty input from stdin")).unwrap();
            assert_eq!(
                value,
                json!({"status": "error", "message": "Empty input from stdin"})
            );
        }

        #[test]
        fn sent_carries_formatted_alert_and_details() {
            let send = SendResult::error("API error: 500").with_details("boom");
            let result = ProcessResult::sent(send, "🚨 *ALERT FIRING* 🚨".to_string());
            let value = serde_json::to_value(&result).unwrap();

            assert!(result.is_error());
            assert_eq!(value["status"], "error");
            assert_eq!(value["details"], "boom");
            assert_eq!(value["formatted_alert"], "🚨 *ALERT FIRING* 🚨");
            assert!(value.get("data").is_none());
        }

        #[test]
        fn passed_through_carries_data() {
            let result = ProcessResult::passed_through(json!({"message": "hello"}));
            let value = serde_json::to_value(&result).unwrap();

            assert!(!result.is_error());
            assert_eq!(value["status"], "success");
            assert_eq!(value["data"], json!({"message": "hello"}));
            assert!(value.get("formatted_alert").is_none());
        }

        #[test]
        fn passed_through_keeps_null_data() {
            let result = ProcessResult::passed_through(Value::Null);
            assert_eq!(result.data, Some(Value::Null));
        }
    }
}
