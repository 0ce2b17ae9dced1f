use anyhow::Result;
use tactica_core::Settings;
use tactica_strategy::StrategyDef;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::decide_json;

/// Reads JSON snapshots line by line from `reader` and writes one line of commands
/// per snapshot to `writer`. Lines that fail to parse are logged and skipped.
///
/// Returns the number of snapshots decided.
pub async fn process_stream<R, W>(
    reader: R,
    mut writer: W,
    settings: &Settings,
    strategy: StrategyDef,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut ticks = 0;
    let mut line_no = 0;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match decide_json(line, settings, strategy) {
            Ok(commands) => {
                writer.write_all(commands.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
                ticks += 1;
            }
            Err(err) => tracing::warn!("Skipping line {line_no}: {err:#}"),
        }
    }
    Ok(ticks)
}

/// Decides snapshots from stdin until it is closed or ctrl-c is pressed.
pub async fn run(settings: &Settings, strategy: StrategyDef) -> Result<()> {
    tracing::info!("Reading snapshots from stdin with the {strategy} strategy");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = process_stream(stdin, stdout, settings, strategy) => {
            let ticks = result?;
            tracing::info!("Input closed after {ticks} snapshots");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }
    Ok(())
}
