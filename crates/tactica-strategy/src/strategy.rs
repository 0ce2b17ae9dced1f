use std::{fmt, str::FromStr};

use tactica_core::{Lane, Role, RoleAssignment, WorldSnapshot};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}', expected one of: {expected}")]
pub struct ParseDefError {
    kind: &'static str,
    name: String,
    expected: String,
}

impl ParseDefError {
    pub(crate) fn new(kind: &'static str, name: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            expected: expected.join(", "),
        }
    }
}

/// A named team setup: which role each of our agents plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyDef {
    /// Keeper, striker and two supporters, one per lane.
    #[default]
    Tactical,
    /// Keeper plus everybody chasing the ball.
    KeeperChase,
    /// Nobody moves.
    Idle,
}

impl StrategyDef {
    pub const ALL: [StrategyDef; 3] = [
        StrategyDef::Tactical,
        StrategyDef::KeeperChase,
        StrategyDef::Idle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyDef::Tactical => "tactical",
            StrategyDef::KeeperChase => "keeper-chase",
            StrategyDef::Idle => "idle",
        }
    }

    fn lineup(&self) -> &'static [Role] {
        match self {
            StrategyDef::Tactical => &[
                Role::Goalkeeper,
                Role::Striker,
                Role::Support(Lane::Upper),
                Role::Support(Lane::Lower),
            ],
            StrategyDef::KeeperChase => {
                &[Role::Goalkeeper, Role::Chaser, Role::Chaser, Role::Chaser]
            }
            StrategyDef::Idle => &[],
        }
    }

    /// Assigns roles to our agents in slot order. Agents beyond the lineup become
    /// supporters on alternating lanes (or idle for [`StrategyDef::Idle`]).
    pub fn assign_roles(&self, world: &WorldSnapshot) -> RoleAssignment {
        let mut agents: Vec<_> = world.own_players().collect();
        agents.sort_by_key(|a| a.slot);

        let lineup = self.lineup();
        let mut extra_lane = Lane::Upper;
        let mut roles = RoleAssignment::new();
        for (idx, agent) in agents.into_iter().enumerate() {
            let role = match (self, lineup.get(idx)) {
                (_, Some(role)) => *role,
                (StrategyDef::Idle, None) => Role::Idle,
                (_, None) => {
                    let lane = extra_lane;
                    extra_lane = extra_lane.other();
                    Role::Support(lane)
                }
            };
            log::debug!("{}: player {} plays {}", self, agent.id, role);
            roles.assign(agent.id, role);
        }
        roles
    }
}

impl fmt::Display for StrategyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyDef {
    type Err = ParseDefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyDef::ALL
            .into_iter()
            .find(|def| def.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names = StrategyDef::ALL.map(|def| def.name());
                ParseDefError::new("strategy", s, &names)
            })
    }
}
