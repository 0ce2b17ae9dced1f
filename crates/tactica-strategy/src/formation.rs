use std::{fmt, str::FromStr};

use tactica_core::{FieldGeometry, Score, Vector2};

use crate::{frame::AttackFrame, strategy::ParseDefError};

/// Kick-off positions, as fractions of the field size in the attack frame.
const KEEPER: [(f64, f64); 4] = [(0.1, 0.5), (0.5, 0.5), (0.5, 0.9), (0.4, 0.3)];
const RUSH: [(f64, f64); 4] = [(0.3, 0.5), (0.25, 0.85), (0.5, 0.9), (0.5, 0.05)];

/// Where our agents line up whenever the field is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormationDef {
    /// One agent near our goal, the rest around midfield.
    Keeper,
    /// Everybody pushed up to win the ball quickly.
    Rush,
    /// [`FormationDef::Rush`] while trailing, [`FormationDef::Keeper`] otherwise.
    #[default]
    Adaptive,
}

impl FormationDef {
    pub const ALL: [FormationDef; 3] = [
        FormationDef::Keeper,
        FormationDef::Rush,
        FormationDef::Adaptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormationDef::Keeper => "keeper",
            FormationDef::Rush => "rush",
            FormationDef::Adaptive => "adaptive",
        }
    }
}

/// Computes the reset positions for the given score, in world coordinates and in
/// slot order.
pub fn formation(def: FormationDef, score: Score, field: &FieldGeometry) -> Vec<Vector2> {
    let layout = match def {
        FormationDef::Keeper => &KEEPER,
        FormationDef::Rush => &RUSH,
        FormationDef::Adaptive if score.margin() < 0 => &RUSH,
        FormationDef::Adaptive => &KEEPER,
    };

    let frame = AttackFrame::new(field);
    layout
        .iter()
        .map(|&(fx, fy)| frame.point(Vector2::new(fx * field.width, fy * field.height)))
        .collect()
}

impl fmt::Display for FormationDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormationDef {
    type Err = ParseDefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormationDef::ALL
            .into_iter()
            .find(|def| def.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names = FormationDef::ALL.map(|def| def.name());
                ParseDefError::new("formation", s, &names)
            })
    }
}
