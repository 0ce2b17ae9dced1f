use std::{path::Path, process::ExitCode, str::FromStr};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::Cli;

/// Sets up tracing to stderr plus a JSON log file in `log_dir`. stdout is left free
/// for command output.
fn setup_logging(log_level: &str, log_dir: &Path) -> Result<WorkerGuard> {
    let log_level = tracing::Level::from_str(log_level)
        .map_err(|_| anyhow::anyhow!("Invalid log level: {log_level}"))?;

    let time = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let appender = tracing_appender::rolling::never(log_dir, format!("tactica-{time}.log"));
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

    let stderr_layer = fmt::Subscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    let logfile_layer = fmt::Layer::default()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking_appender);
    stderr_layer
        .with(logfile_layer)
        .try_init()
        .context("Unable to set global tracing subscriber")?;

    tracing::info!("Saving logs to {}", log_dir.display());
    Ok(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match cli
        .ensure_log_dir_path()
        .and_then(|dir| setup_logging(&cli.log_level, &dir))
    {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    cli.start().await
}
