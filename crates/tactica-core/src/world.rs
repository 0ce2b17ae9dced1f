use serde::{Deserialize, Serialize};

use crate::{PlayerId, Vector2};

fn zero_vector() -> Vector2 {
    Vector2::zeros()
}

/// Which side an agent plays for, from the point of view of the controlled team.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    Own,
    Opponent,
}

/// A single agent as reported by the simulator for one tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentState {
    /// The agent's unique id
    pub id: PlayerId,
    pub team: Team,
    /// Formation slot (role index) assigned by the simulator
    #[serde(default)]
    pub slot: usize,
    /// Position in field units
    pub position: Vector2,
    /// Velocity in field units per second
    #[serde(default = "zero_vector")]
    pub velocity: Vector2,
}

impl AgentState {
    pub fn new(id: u32, team: Team, position: Vector2) -> Self {
        Self {
            id: PlayerId::new(id),
            team,
            slot: id as usize,
            position,
            velocity: Vector2::zeros(),
        }
    }

    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }
}

/// The ball state from a single tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BallState {
    /// Position of the ball in field units
    pub position: Vector2,
    /// Velocity of the ball in field units per second
    #[serde(default = "zero_vector")]
    pub velocity: Vector2,
}

impl BallState {
    pub fn at_rest(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::zeros(),
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Everything the engine gets to see for one tick. The snapshot is never
/// modified while commands are being computed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub agents: Vec<AgentState>,
    pub ball: BallState,
}

impl WorldSnapshot {
    pub fn new(agents: Vec<AgentState>, ball: BallState) -> Self {
        Self { agents, ball }
    }

    pub fn team(&self, team: Team) -> impl Iterator<Item = &AgentState> {
        self.agents.iter().filter(move |a| a.team == team)
    }

    pub fn own_players(&self) -> impl Iterator<Item = &AgentState> {
        self.team(Team::Own)
    }

    pub fn opp_players(&self) -> impl Iterator<Item = &AgentState> {
        self.team(Team::Opponent)
    }

    /// Looks up an agent of the given team by id.
    pub fn agent(&self, team: Team, id: PlayerId) -> Option<&AgentState> {
        self.team(team).find(|a| a.id == id)
    }
}

/// Match score, as seen by the controlled team.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub ours: u32,
    pub theirs: u32,
}

impl Score {
    pub fn new(ours: u32, theirs: u32) -> Self {
        Self { ours, theirs }
    }

    /// Goal difference from our point of view.
    pub fn margin(&self) -> i64 {
        self.ours as i64 - self.theirs as i64
    }
}
