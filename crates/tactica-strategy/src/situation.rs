use tactica_core::{
    AgentState, BallState, FieldGeometry, PlayerId, RoleAssignment, Settings, Team, Vector2,
    WorldSnapshot,
};

/// Who controls the ball this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Possession {
    Own(PlayerId),
    Opponent(PlayerId),
    Free,
}

impl Possession {
    /// The first of our agents within `radius` of the ball, otherwise the first
    /// opponent, otherwise nobody.
    pub fn of(world: &WorldSnapshot, radius: f64) -> Self {
        let holder = |team: Team| {
            world
                .team(team)
                .find(|a| (a.position - world.ball.position).norm() <= radius)
                .map(|a| a.id)
        };
        if let Some(id) = holder(Team::Own) {
            Possession::Own(id)
        } else if let Some(id) = holder(Team::Opponent) {
            Possession::Opponent(id)
        } else {
            Possession::Free
        }
    }
}

/// Everything the per-agent behaviours need for one tick, already in the attack
/// frame.
#[derive(Debug)]
pub struct Situation<'a> {
    pub world: &'a WorldSnapshot,
    pub field: &'a FieldGeometry,
    pub roles: &'a RoleAssignment,
    pub settings: &'a Settings,
    pub possession: Possession,
    opponents: Vec<Vector2>,
}

impl<'a> Situation<'a> {
    pub fn new(
        world: &'a WorldSnapshot,
        field: &'a FieldGeometry,
        roles: &'a RoleAssignment,
        settings: &'a Settings,
    ) -> Self {
        let possession = Possession::of(world, settings.possession_radius());
        log::trace!("possession: {possession:?}");
        Self {
            world,
            field,
            roles,
            settings,
            possession,
            opponents: world.opp_players().map(|a| a.position).collect(),
        }
    }

    pub fn ball(&self) -> &BallState {
        &self.world.ball
    }

    /// Opponent positions, in snapshot order.
    pub fn opponents(&self) -> &[Vector2] {
        &self.opponents
    }

    /// Our agents other than `id`.
    pub fn teammates_of(&self, id: PlayerId) -> impl Iterator<Item = &'a AgentState> {
        self.world.own_players().filter(move |a| a.id != id)
    }

    pub fn is_holder(&self, id: PlayerId) -> bool {
        self.possession == Possession::Own(id)
    }

    /// Scales a multiple of the player radius to field units.
    pub fn radii(&self, factor: f64) -> f64 {
        factor * self.settings.physics.player_radius
    }
}
