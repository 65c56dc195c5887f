//! One run of the processor: resolved input in, result out.

use std::io::Write;

use tracing::error;
use whin_alerts::{process_message, MessageRelay, ProcessResult, RelayError};

use crate::error::InputError;
use crate::input::RawInput;

/// Turns the resolved input into a result.
///
/// The relay is only built once there is something to process. Input errors
/// and relay construction errors are reported as error results like any
/// other failure.
pub async fn process_input<R, F, W>(
    input: Result<RawInput, InputError>,
    build_relay: F,
    out: &mut W,
) -> ProcessResult
where
    R: MessageRelay + Sync,
    F: FnOnce() -> Result<R, RelayError>,
    W: Write,
{
    let raw = match input {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = %e, "no message to process");
            return ProcessResult::error(e.to_string());
        }
    };

    match build_relay() {
        Ok(relay) => process_message(&raw.text, &relay, out).await,
        Err(e) => {
            error!(error = %e, "failed to build relay client");
            ProcessResult::error(e.to_string())
        }
    }
}
