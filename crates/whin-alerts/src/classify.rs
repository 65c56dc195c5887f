//! Payload classification.

use std::fmt;

use serde_json::Value;

/// The kind of message carried by a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// A Grafana/Alertmanager style webhook.
    Alert,
    /// Anything else.
    Generic,
}

impl MessageKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a parsed payload.
///
/// A mapping with an `alerts` or a `status` key is an alert. This also
/// catches generic messages that happen to carry a `status` field; callers
/// rely on that behaviour, so it is kept as is.
#[must_use]
pub fn classify(value: &Value) -> MessageKind {
    match value {
        Value::Object(map) if map.contains_key("alerts") || map.contains_key("status") => {
            MessageKind::Alert
        }
        _ => MessageKind::Generic,
    }
}
