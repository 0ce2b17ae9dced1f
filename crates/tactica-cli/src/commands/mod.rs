use anyhow::{Context, Result};
use tactica_core::{Settings, WorldSnapshot};
use tactica_strategy::{decide, StrategyDef};

pub mod formation;
pub mod init_settings;
pub mod run;
pub mod tick;

/// Decides one JSON-encoded snapshot and returns the commands as a single JSON line.
fn decide_json(snapshot: &str, settings: &Settings, strategy: StrategyDef) -> Result<String> {
    let world: WorldSnapshot =
        serde_json::from_str(snapshot).context("Failed to parse world snapshot")?;
    let roles = strategy.assign_roles(&world);
    let commands = decide(&world, &roles, settings);
    Ok(serde_json::to_string(&commands)?)
}
