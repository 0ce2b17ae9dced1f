use std::io::Write;

use anyhow::Result;
use tactica_core::{FieldGeometry, Score};
use tactica_strategy::{formation as layout, FormationDef};

/// Prints the reset positions for the given score as a JSON array of `[x, y]`.
pub fn formation(
    def: FormationDef,
    score: Score,
    field: &FieldGeometry,
    mut out: impl Write,
) -> Result<()> {
    let positions = layout(def, score, field);
    tracing::debug!("{def} formation at {}:{}", score.ours, score.theirs);
    writeln!(out, "{}", serde_json::to_string(&positions)?)?;
    Ok(())
}
