use tactica_core::{AgentState, Command, Lane, PlayerId, Role, Team, Vector2, VectorExt};

use crate::{
    intercept::predict_intercept,
    obstruction::nearest_distance,
    situation::{Possession, Situation},
};

/// Behaviour for outfield players without the ball.
pub fn off_ball(situation: &Situation, agent: &AgentState, role: Role) -> Command {
    match situation.possession {
        Possession::Free => pursue_ball(situation, agent),
        Possession::Own(_) => match role {
            Role::Support(lane) => get_open(situation, agent, lane),
            _ => push_forward(situation, agent),
        },
        Possession::Opponent(holder) => mark(situation, agent, holder),
    }
}

/// Heads for the point where the ball can be intercepted.
pub fn pursue_ball(situation: &Situation, agent: &AgentState) -> Command {
    let physics = &situation.settings.physics;
    let target = predict_intercept(
        situation.ball(),
        agent.position,
        physics.player_max_speed,
        physics.ball_friction,
        &situation.settings.tactics.intercept,
    );
    Command::moving(target - agent.position)
}

/// Full speed at the ball. Straight ahead if already on top of it.
pub fn chase(situation: &Situation, agent: &AgentState) -> Command {
    let to_ball = situation.ball().position - agent.position;
    Command::moving(to_ball.unit_or(Vector2::new(1.0, 0.0)))
}

/// Advances along the lane to offer a pass, stepping away from close opponents.
fn get_open(situation: &Situation, agent: &AgentState, lane: Lane) -> Command {
    let field = situation.field;
    let tactics = &situation.settings.tactics;
    let position = agent.position;

    let nearest = situation
        .opponents()
        .iter()
        .min_by(|a, b| {
            let da = (*a - position).norm();
            let db = (*b - position).norm();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied();

    let target = match nearest {
        Some(opponent)
            if (opponent - position).norm() < situation.radii(tactics.evade_radius_factor) =>
        {
            let away = (position - opponent).unit_or(Vector2::zeros());
            position + away * situation.radii(2.0)
        }
        _ => Vector2::new(
            (field.width * tactics.support_max_x)
                .min(position.x + field.width * tactics.support_advance),
            field.height * 0.5 + lane.offset_sign() * field.height * tactics.support_lane_offset,
        ),
    };
    Command::moving(target - position)
}

/// Moves to the attacking position in front of the opponent goal.
fn push_forward(situation: &Situation, agent: &AgentState) -> Command {
    let field = situation.field;
    let target = Vector2::new(
        field.width * situation.settings.tactics.support_max_x,
        field.height * 0.5,
    );
    Command::moving(target - agent.position)
}

/// Picks up the nearest opponent nobody else is covering and stands between them
/// and the ball.
fn mark(situation: &Situation, agent: &AgentState, holder: PlayerId) -> Command {
    let tactics = &situation.settings.tactics;
    let ball = situation.ball().position;
    let position = agent.position;
    let mark_radius = situation.radii(tactics.mark_radius_factor);

    let covering: Vec<Vector2> = situation
        .teammates_of(agent.id)
        .filter(|mate| situation.roles.role_of(mate.id) != Role::Goalkeeper)
        .map(|mate| mate.position)
        .collect();

    let target = situation
        .world
        .team(Team::Opponent)
        .filter(|opp| opp.id != holder)
        .filter(|opp| nearest_distance(opp.position, &covering) > mark_radius)
        .min_by(|a, b| {
            let da = (a.position - position).norm();
            let db = (b.position - position).norm();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

    match target {
        Some(opponent) => {
            let spot = ball + (opponent.position - ball) * tactics.mark_ball_fraction;
            Command::moving(spot - position)
        }
        None => {
            let to_ball = (ball - position).unit_or(Vector2::zeros());
            Command::moving(to_ball * tactics.dribble_speed)
        }
    }
}
