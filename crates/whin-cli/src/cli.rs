//! Command-line argument parsing with clap.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use whin_alerts::relay::{DEFAULT_API_HOST, DEFAULT_API_URL};
use whin_alerts::RelayConfig;

/// WhatsApp message processor.
///
/// Reads a JSON message from `--message`, the `MESSAGE_JSON` environment
/// variable or standard input. Grafana alerts are formatted and forwarded to
/// WhatsApp, other messages are printed.
#[derive(Parser, Debug, Clone)]
#[command(name = "whatsapp-mgr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON message to process.
    #[arg(short, long)]
    pub message: Option<String>,

    /// RapidAPI key for the whin relay.
    #[arg(long, env = "WHIN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Relay endpoint messages are posted to.
    #[arg(long, env = "WHIN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Value sent in the `x-rapidapi-host` header.
    #[arg(long, env = "WHIN_API_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Give up on the relay after this many seconds. Waits indefinitely by default.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Builds the relay configuration from the parsed arguments.
    #[must_use]
    pub fn relay_config(&self) -> RelayConfig {
        let mut config = RelayConfig::default()
            .with_url(&self.api_url)
            .with_host(&self.api_host);
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Log output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_message_flag() {
        let cli = Cli::parse_from(["whatsapp-mgr", "--message", r#"{"a":1}"#]);
        assert_eq!(cli.message.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn cli_parses_short_message_flag() {
        let cli = Cli::parse_from(["whatsapp-mgr", "-m", "{}"]);
        assert_eq!(cli.message.as_deref(), Some("{}"));
    }

    #[test]
    fn cli_message_is_optional() {
        let cli = Cli::parse_from(["whatsapp-mgr", "--api-url", "http://localhost/send"]);
        assert!(cli.message.is_none());
        assert_eq!(cli.api_url, "http://localhost/send");
    }

    #[test]
    fn cli_parses_log_format() {
        let cli = Cli::parse_from(["whatsapp-mgr", "--log-format", "json"]);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn relay_config_from_args() {
        let cli = Cli::parse_from([
            "whatsapp-mgr",
            "--api-key",
            "secret",
            "--api-url",
            "http://localhost:9000/send2group",
            "--api-host",
            "localhost",
            "--timeout-secs",
            "15",
        ]);
        let config = cli.relay_config();

        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.url, "http://localhost:9000/send2group");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn relay_config_has_no_timeout_by_default() {
        let cli = Cli::parse_from(["whatsapp-mgr", "--api-key", "secret"]);
        assert!(cli.relay_config().timeout.is_none());
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
