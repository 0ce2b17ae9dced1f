use std::path::Path;

use anyhow::{bail, Context, Result};
use tactica_core::Settings;

/// Writes the default settings to `path`. Refuses to overwrite an existing file
/// unless `force` is set.
pub fn init_settings(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Settings file {} already exists, use --force to overwrite it",
            path.display()
        );
    }
    Settings::default()
        .store(path)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    tracing::info!("Wrote default settings to {}", path.display());
    Ok(())
}
