//! Delivery to the whin WhatsApp relay.
//!
//! This module provides the [`MessageRelay`] trait and [`WhinRelay`], which
//! posts messages to the whin2 group endpoint on RapidAPI.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::error::RelayError;
use crate::result::SendResult;

/// Default endpoint for group messages.
pub const DEFAULT_API_URL: &str = "https://whin2.p.rapidapi.com/send2group";

/// Default RapidAPI host identifier.
pub const DEFAULT_API_HOST: &str = "whin2.p.rapidapi.com";

const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

/// Message returned when the relay accepts a message.
pub const SENT_MESSAGE: &str = "Message sent to WhatsApp";

/// Configuration for the relay client.
#[derive(Clone)]
pub struct RelayConfig {
    /// Endpoint the message is posted to.
    pub url: String,
    /// Value of the `x-rapidapi-host` header.
    pub host: String,
    /// RapidAPI key. Empty keys count as missing.
    pub api_key: Option<String>,
    /// Request timeout. `None` waits for as long as the transport does.
    pub timeout: Option<Duration>,
}

impl RelayConfig {
    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the host header value.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the API key if one is set and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            host: DEFAULT_API_HOST.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

// The key stays out of debug output and therefore out of logs.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("url", &self.url)
            .field("host", &self.host)
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A destination that text messages can be delivered to.
pub trait MessageRelay {
    /// Returns the name of this relay.
    fn name(&self) -> &str;

    /// Delivers a message with a single attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`RelayError`] describing why the message was not accepted.
    fn deliver(&self, text: &str) -> impl Future<Output = Result<(), RelayError>> + Send;

    /// Delivers a message and reports the outcome as a [`SendResult`].
    fn send(&self, text: &str) -> impl Future<Output = SendResult> + Send
    where
        Self: Sync,
    {
        async move {
            match self.deliver(text).await {
                Ok(()) => SendResult::success(SENT_MESSAGE),
                Err(err) => SendResult::from(err),
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    text: &'a str,
}

/// Relay client for the whin2 RapidAPI endpoint.
#[derive(Debug, Clone)]
pub struct WhinRelay {
    config: RelayConfig,
    client: reqwest::Client,
}

impl WhinRelay {
    /// Creates a relay client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Client`] if the HTTP client cannot be built.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RelayError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }
}

impl MessageRelay for WhinRelay {
    fn name(&self) -> &str {
        "whin"
    }

    async fn deliver(&self, text: &str) -> Result<(), RelayError> {
        info!(
            relay = %self.name(),
            length = text.chars().count(),
            "sending message to WhatsApp"
        );

        let Some(api_key) = self.config.api_key() else {
            error!("WHIN_API_KEY environment variable is not set");
            return Err(RelayError::MissingCredential);
        };

        let response = self
            .client
            .post(&self.config.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(HOST_HEADER, &self.config.host)
            .header(KEY_HEADER, api_key)
            .json(&SendRequest { text })
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "error sending to WhatsApp");
                RelayError::from(e)
            })?;

        let status = response.status();
        info!(status = status.as_u16(), "WhatsApp API response");

        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), body = %body, "WhatsApp API error");
        Err(RelayError::ApiStatus {
            status: status.as_u16(),
            body,
        })
    }
}
