//! Result output.

use std::io::Write;

use whin_alerts::ProcessResult;

use crate::error::CliError;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for any failed run.
pub const EXIT_FAILURE: u8 = 1;

/// Writes the result as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_result<W: Write>(writer: &mut W, result: &ProcessResult) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *writer, result)
        .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Maps a result to the process exit status.
#[must_use]
pub fn exit_status(result: &ProcessResult) -> u8 {
    if result.is_error() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    }
}
