use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use tactica_core::Settings;
use tactica_strategy::StrategyDef;

use super::decide_json;

/// Decides a single snapshot file, writing the commands to `out`.
pub fn tick(
    snapshot: &Path,
    settings: &Settings,
    strategy: StrategyDef,
    mut out: impl Write,
) -> Result<()> {
    let contents = std::fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;
    let commands = decide_json(&contents, settings, strategy)?;
    writeln!(out, "{commands}")?;
    Ok(())
}
