use tactica_core::{AgentState, Command, Vector2, VectorExt};

use crate::{
    bank_shot::{direct_shot, find_bank_shot, ShotConstraints, ShotSolution},
    obstruction::{count_within, nearest_distance},
    passing::select_pass_target,
    situation::Situation,
};

/// The two goal corners, the one farther from its nearest opponent first. The top
/// corner goes first if both are equally covered.
pub fn goal_corners(situation: &Situation) -> [Vector2; 2] {
    let goal = situation.field.opponent_goal_center;
    let half = situation.field.goal_height / 2.0;
    let top = Vector2::new(goal.x, goal.y - half);
    let bottom = Vector2::new(goal.x, goal.y + half);

    let opponents = situation.opponents();
    if nearest_distance(bottom, opponents) > nearest_distance(top, opponents) {
        [bottom, top]
    } else {
        [top, bottom]
    }
}

/// Best open shot at goal from `position`: direct shots at either corner first,
/// then bank shots.
pub fn find_shot(situation: &Situation, position: Vector2) -> Option<ShotSolution> {
    let constraints = ShotConstraints::new(
        situation.opponents(),
        situation.settings.shot_clearance(),
        situation.settings.tactics.wall_margin,
    );
    let corners = goal_corners(situation);

    corners
        .iter()
        .find_map(|&corner| direct_shot(position, corner, &constraints))
        .or_else(|| {
            corners.iter().find_map(|&corner| {
                find_bank_shot(position, corner, situation.field, &constraints)
            })
        })
}

/// Behaviour for whoever holds the ball: shoot if there is an open shot, pass when
/// crowded, otherwise dribble.
pub fn carry(situation: &Situation, agent: &AgentState) -> Command {
    let position = agent.position;
    let tactics = &situation.settings.tactics;

    if let Some(shot) = find_shot(situation, position) {
        log::debug!("player {} shoots ({:?})", agent.id, shot.kind);
        return Command::kick(shot.direction);
    }

    let pressure = count_within(
        position,
        situation.opponents(),
        situation.radii(tactics.pressure_radius_factor),
    );
    if pressure >= tactics.pressure_count {
        let target = select_pass_target(
            position,
            situation.teammates_of(agent.id),
            situation.opponents(),
            situation.settings,
        );
        match situation.teammates_of(agent.id).find(|mate| mate.id == target) {
            Some(mate) => match (mate.position - position).try_unit() {
                Ok(direction) => {
                    log::debug!("player {} passes to {}", agent.id, target);
                    return Command::kick(direction);
                }
                Err(_) => log::debug!("pass target {target} is on top of the carrier, dribbling"),
            },
            None => log::debug!("pass target {target} is not on the field, dribbling instead"),
        }
    }

    dribble(situation, position)
}

/// Runs at goal until deep in the opponent half, then drifts to the centre band.
fn dribble(situation: &Situation, position: Vector2) -> Command {
    let field = situation.field;
    let tactics = &situation.settings.tactics;
    let to_goal = field.opponent_goal_center - position;

    if position.x < field.width * tactics.shooting_zone {
        return Command::moving(to_goal * tactics.dribble_speed);
    }
    let movement = if position.y < field.height * 0.4 {
        Vector2::new(to_goal.x * 0.5, 0.5)
    } else if position.y > field.height * 0.6 {
        Vector2::new(to_goal.x * 0.5, -0.5)
    } else {
        to_goal
    };
    Command::moving(movement)
}
