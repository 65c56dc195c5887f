//! Input resolution.
//!
//! Exactly one source is used, in priority order: the `--message` flag, the
//! `MESSAGE_JSON` environment variable, then piped standard input. A source
//! that is present wins even if its content is empty or invalid.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, IsTerminal};

use tracing::{error, info};

use crate::error::InputError;

/// Environment variable holding the message JSON.
pub const MESSAGE_ENV: &str = "MESSAGE_JSON";

/// Where the raw input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// The `--message` flag.
    Flag,
    /// The `MESSAGE_JSON` environment variable.
    Env,
    /// Standard input.
    Stdin,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "command line argument"),
            Self::Env => write!(f, "{MESSAGE_ENV} environment variable"),
            Self::Stdin => write!(f, "standard input"),
        }
    }
}

/// The raw message text and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    /// Where the text came from.
    pub source: InputSource,
    /// The unparsed text.
    pub text: String,
}

/// A readable standard input.
pub trait InputStream {
    /// Returns true if the stream is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Reads the whole stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be read or is not UTF-8.
    fn read_all(&mut self) -> io::Result<String>;
}

/// The process's standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessStdin;

impl InputStream for ProcessStdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_all(&mut self) -> io::Result<String> {
        io::read_to_string(io::stdin())
    }
}

/// Picks the raw message from the first available source.
///
/// # Errors
///
/// Returns [`InputError::InvalidEnv`] if `MESSAGE_JSON` is not UTF-8,
/// [`InputError::EmptyStdin`] if piped stdin is blank,
/// [`InputError::NoInput`] if there is nothing to read, and
/// [`InputError::Io`] if stdin cannot be read.
pub fn resolve_input<S: InputStream>(
    flag: Option<String>,
    env: Option<OsString>,
    stdin: &mut S,
) -> Result<RawInput, InputError> {
    let (source, text) = if let Some(text) = flag {
        (InputSource::Flag, text)
    } else if let Some(value) = env {
        let text = value.into_string().map_err(|_| {
            error!("{MESSAGE_ENV} is not valid UTF-8");
            InputError::InvalidEnv
        })?;
        (InputSource::Env, text)
    } else if !stdin.is_terminal() {
        let text = stdin.read_all()?.trim().to_string();
        if text.is_empty() {
            error!("empty input from stdin");
            return Err(InputError::EmptyStdin);
        }
        (InputSource::Stdin, text)
    } else {
        error!(
            "no message input provided. Use --message argument, {MESSAGE_ENV} environment variable, or pipe data via stdin"
        );
        return Err(InputError::NoInput);
    };

    info!(source = %source, "reading message");
    Ok(RawInput { source, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Debug)]
    struct FakeStdin {
        terminal: bool,
        content: io::Result<String>,
        reads: usize,
    }

    impl FakeStdin {
        fn piped(content: &str) -> Self {
            Self {
                terminal: false,
                content: Ok(content.to_string()),
                reads: 0,
            }
        }

        fn terminal() -> Self {
            Self {
                terminal: true,
                content: Ok(String::new()),
                reads: 0,
            }
        }

        fn broken() -> Self {
            Self {
                terminal: false,
                content: Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
                reads: 0,
            }
        }
    }

    impl InputStream for FakeStdin {
        fn is_terminal(&self) -> bool {
            self.terminal
        }

        fn read_all(&mut self) -> io::Result<String> {
            self.reads += 1;
            match &self.content {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    #[test]
    fn flag_wins_over_env_and_stdin() {
        let mut stdin = FakeStdin::piped(r#"{"from":"stdin"}"#);
        let input = resolve_input(
            Some(r#"{"from":"flag"}"#.to_string()),
            Some(r#"{"from":"env"}"#.into()),
            &mut stdin,
        )
        .unwrap();

        assert_eq!(input.source, InputSource::Flag);
        assert_eq!(input.text, r#"{"from":"flag"}"#);
        assert_eq!(stdin.reads, 0);
    }

    #[test]
    fn env_wins_over_stdin() {
        let mut stdin = FakeStdin::piped(r#"{"from":"stdin"}"#);
        let input = resolve_input(None, Some(r#"{"from":"env"}"#.into()), &mut stdin).unwrap();

        assert_eq!(input.source, InputSource::Env);
        assert_eq!(input.text, r#"{"from":"env"}"#);
        assert_eq!(stdin.reads, 0);
    }

    #[test]
    fn empty_flag_is_still_used() {
        let mut stdin = FakeStdin::piped("{}");
        let input = resolve_input(Some(String::new()), None, &mut stdin).unwrap();

        assert_eq!(input.source, InputSource::Flag);
        assert!(input.text.is_empty());
    }

    #[test]
    fn empty_env_is_still_used() {
        let mut stdin = FakeStdin::piped("{}");
        let input = resolve_input(None, Some(OsString::new()), &mut stdin).unwrap();

        assert_eq!(input.source, InputSource::Env);
        assert_eq!(stdin.reads, 0);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_env_is_used_and_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let mut stdin = FakeStdin::piped(r#"{"from":"stdin"}"#);
        let env = OsString::from_vec(b"{\"message\": \"\xff\"}".to_vec());
        let err = resolve_input(None, Some(env), &mut stdin).unwrap_err();

        assert!(matches!(err, InputError::InvalidEnv));
        assert_eq!(stdin.reads, 0);
    }

    #[test]
    fn stdin_is_trimmed() {
        let mut stdin = FakeStdin::piped("\n  {\"status\": \"firing\"}  \n\n");
        let input = resolve_input(None, None, &mut stdin).unwrap();

        assert_eq!(input.source, InputSource::Stdin);
        assert_eq!(input.text, "{\"status\": \"firing\"}");
    }

    #[test_case("" ; "empty")]
    #[test_case(" \n\t " ; "whitespace")]
    fn blank_stdin_is_an_error(content: &str) {
        let mut stdin = FakeStdin::piped(content);
        let err = resolve_input(None, None, &mut stdin).unwrap_err();

        assert!(matches!(err, InputError::EmptyStdin));
        assert_eq!(err.to_string(), "Empty input from stdin");
    }

    #[test]
    fn terminal_stdin_means_no_input() {
        let mut stdin = FakeStdin::terminal();
        let err = resolve_input(None, None, &mut stdin).unwrap_err();

        assert!(matches!(err, InputError::NoInput));
        assert_eq!(stdin.reads, 0);
    }

    #[test]
    fn unreadable_stdin_is_an_error() {
        let mut stdin = FakeStdin::broken();
        let err = resolve_input(None, None, &mut stdin).unwrap_err();

        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn source_display() {
        assert_eq!(InputSource::Flag.to_string(), "command line argument");
        assert_eq!(InputSource::Env.to_string(), "MESSAGE_JSON environment variable");
        assert_eq!(InputSource::Stdin.to_string(), "standard input");
    }
}
