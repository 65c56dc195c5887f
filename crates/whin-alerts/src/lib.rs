//! Grafana alert formatting and delivery through the whin WhatsApp relay.
//!
//! `whin-alerts` turns a JSON payload into a WhatsApp-friendly text message
//! and forwards it to the whin2 relay API hosted on RapidAPI.
//!
//! # Features
//!
//! - **Classification**: Payloads with an `alerts` or `status` key are treated
//!   as Grafana/Alertmanager webhooks, everything else passes through
//! - **Formatting**: Alerts are rendered as a short summary with resource,
//!   summary, start time and links
//! - **Relay**: A single POST to the relay, with errors reported as values
//! - **Results**: A serializable result record describing the outcome
//!
//! # Example
//!
//! ```rust
//! use whin_alerts::{classify, render_alert, MessageKind};
//!
//! let payload = serde_json::json!({
//!     "status": "firing",
//!     "alerts": [{
//!         "labels": { "alertname": "HighCPU", "namespace": "prod", "pod": "api-0" },
//!         "annotations": { "summary": "CPU above 90%" },
//!         "startsAt": "2024-01-15T10:30:00Z"
//!     }]
//! });
//!
//! assert_eq!(classify(&payload), MessageKind::Alert);
//!
//! let text = render_alert(&payload);
//! assert!(text.starts_with("🚨 *ALERT FIRING* 🚨"));
//! assert!(text.contains("*Started*: 2024-01-15 10:30:00 UTC"));
//! ```
//!
//! # Sending
//!
//! ```rust,ignore
//! use whin_alerts::{process_message, RelayConfig, WhinRelay};
//!
//! let relay = WhinRelay::new(RelayConfig::default().with_api_key("secret"))?;
//! let result = process_message(r#"{"status":"resolved"}"#, &relay, &mut std::io::stdout()).await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod relay;
pub mod result;

// Re-export main types at crate root
pub use classify::{classify, MessageKind};
pub use error::{FormatError, PipelineError, RelayError};
pub use format::{fallback_message, format_alert, format_timestamp, render_alert};
pub use pipeline::{process_message, process_value};
pub use relay::{MessageRelay, RelayConfig, WhinRelay};
pub use result::{ProcessResult, ResultStatus, SendResult};
