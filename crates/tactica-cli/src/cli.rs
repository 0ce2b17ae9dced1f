use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tactica_core::{Score, Settings};
use tactica_strategy::{FormationDef, StrategyDef};

use crate::commands::{
    formation::formation, init_settings::init_settings, run::run, tick::tick,
};

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Decide a single snapshot file and print the commands as JSON.
    #[clap(name = "tick")]
    Tick {
        #[clap(short, long)]
        snapshot: PathBuf,
    },

    /// Read JSON-lines snapshots from stdin and write one line of commands per
    /// snapshot to stdout, until stdin is closed or ctrl-c is pressed.
    #[clap(name = "run")]
    Run,

    /// Print the reset positions for the given score.
    #[clap(name = "formation")]
    Formation {
        #[clap(long, default_value = "0")]
        ours: u32,
        #[clap(long, default_value = "0")]
        theirs: u32,
        #[clap(long, default_value = "adaptive")]
        formation: FormationDef,
    },

    /// Write the default settings file.
    #[clap(name = "init-settings")]
    InitSettings {
        #[clap(long, default_value = "false", action)]
        force: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "tactica")]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(long, short = 'f', default_value = "tactica-settings.json")]
    pub settings_file: PathBuf,

    #[clap(long, default_value = "tactical")]
    pub strategy: StrategyDef,

    #[clap(long, default_value = "info")]
    pub log_level: String,

    /// Where to write the JSON log file. Defaults to the platform's local data
    /// directory.
    #[clap(long)]
    pub log_directory: Option<PathBuf>,
}

impl Cli {
    pub async fn start(self) -> ExitCode {
        let result = match &self.command {
            Command::Tick { snapshot } => self
                .settings()
                .and_then(|settings| tick(snapshot, &settings, self.strategy, std::io::stdout())),
            Command::Run => match self.settings() {
                Ok(settings) => run(&settings, self.strategy).await,
                Err(err) => Err(err),
            },
            Command::Formation {
                ours,
                theirs,
                formation: def,
            } => self.settings().and_then(|settings| {
                formation(
                    *def,
                    Score::new(*ours, *theirs),
                    &settings.field,
                    std::io::stdout(),
                )
            }),
            Command::InitSettings { force } => init_settings(&self.settings_file, *force),
        };

        match result {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!("{err:#}");
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }

    fn settings(&self) -> Result<Settings> {
        Settings::load_or_insert(&self.settings_file).with_context(|| {
            format!(
                "Failed to load settings from {}",
                self.settings_file.display()
            )
        })
    }

    /// Returns the path to the log directory, making sure it exists.
    pub fn ensure_log_dir_path(&self) -> Result<PathBuf> {
        let path = match &self.log_directory {
            Some(path) => path.clone(),
            None => dirs::data_local_dir()
                .map(|p| p.join("tactica"))
                .unwrap_or_else(|| PathBuf::from("logs")),
        };
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create log directory: {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "tactica",
            "--strategy",
            "keeper-chase",
            "formation",
            "--theirs",
            "2",
            "--formation",
            "rush",
        ])
        .unwrap();
        assert_eq!(cli.strategy, StrategyDef::KeeperChase);
        assert_eq!(cli.settings_file, PathBuf::from("tactica-settings.json"));
        assert!(matches!(
            cli.command,
            Command::Formation {
                ours: 0,
                theirs: 2,
                formation: FormationDef::Rush
            }
        ));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(Cli::try_parse_from(["tactica", "--strategy", "v0", "run"]).is_err());
    }

    #[test]
    fn test_log_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");
        let cli = Cli::try_parse_from([
            "tactica",
            "--log-directory",
            logs.to_str().unwrap(),
            "run",
        ])
        .unwrap();
        assert_eq!(cli.ensure_log_dir_path().unwrap(), logs);
        assert!(logs.is_dir());
    }
}
