//! The parse, classify, format and send pipeline.

use std::io::Write;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::classify::{classify, MessageKind};
use crate::error::PipelineError;
use crate::format::render_alert;
use crate::relay::MessageRelay;
use crate::result::ProcessResult;

/// Processes one raw JSON payload.
///
/// Alert payloads are formatted and sent through `relay`. Anything else is
/// pretty-printed to `echo` and reported as a success without contacting the
/// relay. Every failure is reported in the returned [`ProcessResult`].
pub async fn process_message<R, W>(raw: &str, relay: &R, echo: &mut W) -> ProcessResult
where
    R: MessageRelay + Sync,
    W: Write,
{
    match parse(raw) {
        Ok(data) => process_value(data, relay, echo).await,
        Err(err) => {
            error!(error = %err, "invalid JSON format");
            ProcessResult::error(err.to_string())
        }
    }
}

/// Processes an already parsed payload.
pub async fn process_value<R, W>(data: Value, relay: &R, echo: &mut W) -> ProcessResult
where
    R: MessageRelay + Sync,
    W: Write,
{
    let kind = classify(&data);
    info!(kind = %kind, "processing message data");

    match kind {
        MessageKind::Alert => {
            info!("detected Grafana alert format");
            let formatted = render_alert(&data);
            let send = relay.send(&formatted).await;
            info!(relay = %relay.name(), status = %send.status, "relay finished");
            ProcessResult::sent(send, formatted)
        }
        MessageKind::Generic => {
            let pretty = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
            info!(content = %pretty, "regular message (not Grafana alert)");
            if let Err(err) = writeln!(echo, "Message content: {pretty}") {
                warn!(error = %err, "failed to echo message content");
            }
            ProcessResult::passed_through(data)
        }
    }
}

fn parse(raw: &str) -> Result<Value, PipelineError> {
    Ok(serde_json::from_str(raw)?)
}
