use serde::Serialize;

use crate::{Vector2, VectorExt};

/// A command to one of our agents for a single tick.
///
/// The fields are private so that every command goes through [`Command::new`],
/// which guarantees `|movement| <= 1` and a unit (or absent) action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Command {
    /// Desired movement, as a fraction of the agent's top speed.
    movement: Vector2,
    /// Shot/pass direction, if the agent should kick this tick.
    action: Option<Vector2>,
}

impl Command {
    pub fn new(movement: Vector2, action: Option<Vector2>) -> Self {
        Self {
            movement: movement.clamp_unit(),
            action: action.and_then(|a| a.try_unit().ok()),
        }
    }

    /// Move without kicking.
    pub fn moving(movement: Vector2) -> Self {
        Self::new(movement, None)
    }

    /// Stand still and kick in `direction`.
    pub fn kick(direction: Vector2) -> Self {
        Self::new(Vector2::zeros(), Some(direction))
    }

    pub fn stand_still() -> Self {
        Self::new(Vector2::zeros(), None)
    }

    pub fn movement(&self) -> Vector2 {
        self.movement
    }

    pub fn action(&self) -> Option<Vector2> {
        self.action
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::stand_still()
    }
}
