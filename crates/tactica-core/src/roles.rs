use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Which half of the field a support player keeps to when we have the ball.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Towards `y = 0`.
    Upper,
    /// Towards `y = height`.
    Lower,
}

impl Lane {
    /// Sign of the lane's vertical offset from the centre line.
    pub fn offset_sign(&self) -> f64 {
        match self {
            Lane::Upper => -1.0,
            Lane::Lower => 1.0,
        }
    }

    pub fn other(&self) -> Lane {
        match self {
            Lane::Upper => Lane::Lower,
            Lane::Lower => Lane::Upper,
        }
    }
}

/// Behaviour selected for one of our agents.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Guards the penalty box, clears the ball upfield.
    Goalkeeper,
    /// Primary attacker.
    Striker,
    /// Supports the attack from one lane and marks when defending.
    Support(Lane),
    /// Runs at the ball at full speed.
    Chaser,
    /// Does nothing.
    #[default]
    Idle,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Goalkeeper => write!(f, "goalkeeper"),
            Role::Striker => write!(f, "striker"),
            Role::Support(Lane::Upper) => write!(f, "support (upper)"),
            Role::Support(Lane::Lower) => write!(f, "support (lower)"),
            Role::Chaser => write!(f, "chaser"),
            Role::Idle => write!(f, "idle"),
        }
    }
}

/// Explicit mapping from agent to role, produced once per match or formation
/// and passed alongside every snapshot.
///
/// Backed by a small vector of pairs: there are only ever a handful of agents, and
/// keeping insertion order makes iteration deterministic.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RoleAssignment {
    entries: Vec<(PlayerId, Role)>,
}

impl RoleAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `role` to `id`, replacing any previous assignment.
    pub fn assign(&mut self, id: PlayerId, role: Role) -> Option<Role> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == id) {
            return Some(std::mem::replace(existing, role));
        }
        self.entries.push((id, role));
        None
    }

    pub fn with(mut self, id: PlayerId, role: Role) -> Self {
        self.assign(id, role);
        self
    }

    pub fn get(&self, id: PlayerId) -> Option<Role> {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, role)| *role)
    }

    /// The role for `id`, [`Role::Idle`] if none was assigned.
    pub fn role_of(&self, id: PlayerId) -> Role {
        self.get(id).unwrap_or_default()
    }

    /// Ids holding the given role, in assignment order.
    pub fn players_with(&self, role: Role) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries
            .iter()
            .filter(move |(_, r)| *r == role)
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(PlayerId, Role)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PlayerId, Role)> for RoleAssignment {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Role)>>(iter: I) -> Self {
        let mut roles = RoleAssignment::new();
        for (id, role) in iter {
            roles.assign(id, role);
        }
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_replaces() {
        let mut roles = RoleAssignment::new();
        assert_eq!(roles.assign(PlayerId::new(1), Role::Striker), None);
        assert_eq!(
            roles.assign(PlayerId::new(1), Role::Chaser),
            Some(Role::Striker)
        );
        assert_eq!(roles.len(), 1);
        assert_eq!(roles.get(PlayerId::new(1)), Some(Role::Chaser));
    }

    #[test]
    fn test_unknown_player_is_idle() {
        let roles = RoleAssignment::new().with(PlayerId::new(0), Role::Goalkeeper);
        assert_eq!(roles.role_of(PlayerId::new(0)), Role::Goalkeeper);
        assert_eq!(roles.role_of(PlayerId::new(7)), Role::Idle);
    }

    #[test]
    fn test_players_with_keeps_order() {
        let roles: RoleAssignment = [
            (PlayerId::new(3), Role::Chaser),
            (PlayerId::new(0), Role::Goalkeeper),
            (PlayerId::new(1), Role::Chaser),
        ]
        .into_iter()
        .collect();
        let chasers: Vec<_> = roles.players_with(Role::Chaser).collect();
        assert_eq!(chasers, vec![PlayerId::new(3), PlayerId::new(1)]);
    }

    #[test]
    fn test_lane_offsets() {
        assert_eq!(Lane::Upper.offset_sign(), -1.0);
        assert_eq!(Lane::Upper.other(), Lane::Lower);
    }
}
