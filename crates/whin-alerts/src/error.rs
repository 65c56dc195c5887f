//! Error types for the whin-alerts crate.

use thiserror::Error;

/// Errors raised while delivering a message to the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No API key was configured.
    #[error("API key not configured")]
    MissingCredential,

    /// The relay answered with a status other than 200.
    #[error("API error: {status}")]
    ApiStatus {
        /// HTTP status code returned by the relay.
        status: u16,
        /// Response body returned by the relay.
        body: String,
    },

    /// The request never produced a response.
    #[error("Error: {0}")]
    Transport(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors raised while rendering an alert payload.
///
/// These never leave the formatter through [`crate::render_alert`], which
/// substitutes a fallback message instead.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The payload does not have the shape of an alert webhook.
    #[error("malformed alert payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// Errors raised before a payload reaches the formatter.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The raw input is not valid JSON.
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}
