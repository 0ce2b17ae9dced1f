//! # Team-relative coordinates
//!
//! All tactical reasoning happens in the *attack frame*, where our team always
//! attacks towards `+x` and defends the goal near `x = 0`. When the field is set up
//! the other way around, x coordinates are mirrored on the way in and commands are
//! mirrored back on the way out. The `y` axis is never touched, so "upper" and
//! "lower" keep their meaning on both sides.

use tactica_core::{AgentState, BallState, Command, FieldGeometry, Vector2, WorldSnapshot};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackFrame {
    mirrored: bool,
    width: f64,
}

impl AttackFrame {
    pub fn new(field: &FieldGeometry) -> Self {
        Self {
            mirrored: field.own_goal_on_right(),
            width: field.width,
        }
    }

    /// Whether world and frame coordinates differ.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Returns `1.0` if we attack towards world `+x`, `-1.0` otherwise.
    pub fn attacking_direction_sign(&self) -> f64 {
        if self.mirrored {
            -1.0
        } else {
            1.0
        }
    }

    /// Maps a position between world and frame coordinates. The mapping is its own
    /// inverse.
    pub fn point(&self, p: Vector2) -> Vector2 {
        if self.mirrored {
            Vector2::new(self.width - p.x, p.y)
        } else {
            p
        }
    }

    /// Maps a direction or velocity between world and frame coordinates. Its own
    /// inverse as well.
    pub fn direction(&self, v: Vector2) -> Vector2 {
        Vector2::new(v.x * self.attacking_direction_sign(), v.y)
    }

    pub fn field(&self, field: &FieldGeometry) -> FieldGeometry {
        FieldGeometry {
            own_goal_center: self.point(field.own_goal_center),
            opponent_goal_center: self.point(field.opponent_goal_center),
            ..field.clone()
        }
    }

    fn agent(&self, agent: &AgentState) -> AgentState {
        AgentState {
            position: self.point(agent.position),
            velocity: self.direction(agent.velocity),
            ..agent.clone()
        }
    }

    pub fn world(&self, world: &WorldSnapshot) -> WorldSnapshot {
        WorldSnapshot {
            agents: world.agents.iter().map(|a| self.agent(a)).collect(),
            ball: BallState {
                position: self.point(world.ball.position),
                velocity: self.direction(world.ball.velocity),
            },
        }
    }

    /// Maps a command computed in the frame back to world coordinates.
    pub fn command(&self, cmd: &Command) -> Command {
        Command::new(
            self.direction(cmd.movement()),
            cmd.action().map(|a| self.direction(a)),
        )
    }
}
