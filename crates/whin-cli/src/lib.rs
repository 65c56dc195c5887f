//! # whin-cli
//!
//! Command-line front end for `whin-alerts`.
//!
//! The `whatsapp-mgr` binary runs one payload through a linear pipeline and
//! exits:
//!
//! ```text
//! --message / MESSAGE_JSON / stdin
//!        │
//!        ▼
//!   resolve input ──► parse ──► alert? ──yes──► format ──► POST whin2 relay
//!                                  │
//!                                  no ──► echo payload
//!        │
//!        ▼
//!   JSON result on stdout, exit 0 or 1
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod cli;
pub mod error;
pub mod input;
pub mod output;

pub use app::process_input;
pub use cli::{Cli, LogFormat};
pub use error::{CliError, InputError};
pub use input::{resolve_input, InputSource, InputStream, ProcessStdin, RawInput};
pub use output::{exit_status, write_result};
