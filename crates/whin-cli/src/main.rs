//! WhatsApp manager binary entrypoint.
//!
//! This is the main entry point for the `whatsapp-mgr` command-line tool.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use whin_alerts::WhinRelay;
use whin_cli::input::MESSAGE_ENV;
use whin_cli::{
    exit_status, process_input, resolve_input, write_result, Cli, LogFormat, ProcessStdin,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_format);
    info!("starting WhatsApp manager");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let mut stdout = io::stdout().lock();

    let input = resolve_input(cli.message.clone(), env::var_os(MESSAGE_ENV), &mut ProcessStdin);
    let result = process_input(input, || WhinRelay::new(cli.relay_config()), &mut stdout).await;

    write_result(&mut stdout, &result).context("failed to write result")?;
    stdout.flush()?;

    Ok(exit_status(&result))
}
