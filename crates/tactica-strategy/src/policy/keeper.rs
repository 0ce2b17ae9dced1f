use tactica_core::{find_intersection, AgentState, Command, FieldGeometry, Vector2, VectorExt};

use crate::situation::Situation;

const PARALLEL_EPS: f64 = 1e-3;

/// Point on the edge of our penalty box where the keeper cuts the line between the
/// ball and the goal centre.
///
/// The box extends `penalty_box_width` into the field from the goal line and
/// `penalty_box_height` along it, centred on the goal.
pub fn keeper_anchor(ball: Vector2, field: &FieldGeometry) -> Vector2 {
    let goal = field.own_goal_center;
    let front_x = goal.x + field.penalty_box_width;
    let top_y = goal.y - field.penalty_box_height / 2.0;
    let bottom_y = goal.y + field.penalty_box_height / 2.0;
    let front_center = Vector2::new(front_x, goal.y);

    if ball.x <= goal.x {
        return front_center;
    }
    let ball_to_goal = goal - ball;
    if ball_to_goal.x.abs() < PARALLEL_EPS {
        return front_center;
    }

    let Some(on_front) =
        find_intersection(goal, ball_to_goal, front_center, Vector2::new(0.0, 1.0))
    else {
        return front_center;
    };
    if (top_y..=bottom_y).contains(&on_front.y) {
        return Vector2::new(front_x, on_front.y);
    }

    let edge_y = if on_front.y < top_y { top_y } else { bottom_y };
    if ball_to_goal.y.abs() <= PARALLEL_EPS {
        return Vector2::new(front_x, edge_y);
    }
    match find_intersection(
        goal,
        ball_to_goal,
        Vector2::new(goal.x, edge_y),
        Vector2::new(1.0, 0.0),
    ) {
        Some(on_side) => {
            let (low, high) = (goal.x.min(front_x), goal.x.max(front_x));
            Vector2::new(on_side.x.max(low).min(high), edge_y)
        }
        None => Vector2::new(front_x, edge_y),
    }
}

/// Keeps the keeper on the penalty box edge, clearing the ball towards the
/// opponent goal once it is close enough to kick.
pub fn goalkeeper(situation: &Situation, agent: &AgentState) -> Command {
    let ball = situation.ball().position;
    let field = situation.field;

    if (ball - agent.position).norm() < situation.settings.physics.pickup_radius {
        return Command::kick(field.opponent_goal_center - agent.position);
    }

    let movement = keeper_anchor(ball, field) - agent.position;
    let max_movement = situation.settings.tactics.keeper_max_movement.clamp(0.0, 1.0);
    let movement = if movement.norm() > max_movement {
        movement.unit_or(Vector2::zeros()) * max_movement
    } else {
        movement
    };
    Command::moving(movement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tactica_core::{BallState, RoleAssignment, Settings, Team, WorldSnapshot};

    #[test]
    fn test_ball_behind_goal_line() {
        let field = FieldGeometry::default();
        assert_eq!(
            keeper_anchor(Vector2::new(-10.0, 50.0), &field),
            Vector2::new(150.0, 300.0)
        );
    }

    #[test]
    fn test_ball_straight_ahead() {
        let field = FieldGeometry::default();
        let anchor = keeper_anchor(Vector2::new(600.0, 300.0), &field);
        assert_relative_eq!(anchor.x, 150.0, epsilon = 1e-9);
        assert_relative_eq!(anchor.y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ball_at_an_angle_hits_front_edge() {
        let field = FieldGeometry::default();
        // Line from goal (0, 300) to ball (600, 500) crosses x = 150 at y = 350
        let anchor = keeper_anchor(Vector2::new(600.0, 500.0), &field);
        assert_relative_eq!(anchor.x, 150.0, epsilon = 1e-9);
        assert_relative_eq!(anchor.y, 350.0, epsilon = 1e-9);
    }

    #[test]
    fn test_steep_ball_hits_side_edge() {
        let field = FieldGeometry::default();
        // Box spans y in [150, 450]; the line to (100, 0) leaves through the top
        let anchor = keeper_anchor(Vector2::new(100.0, 0.0), &field);
        assert_relative_eq!(anchor.y, 150.0, epsilon = 1e-9);
        assert_relative_eq!(anchor.x, 50.0, epsilon = 1e-9);

        let anchor = keeper_anchor(Vector2::new(100.0, 600.0), &field);
        assert_relative_eq!(anchor.y, 450.0, epsilon = 1e-9);
        assert_relative_eq!(anchor.x, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_anchor_stays_in_box() {
        let field = FieldGeometry::default();
        for x in (0..=1000).step_by(100) {
            for y in (0..=600).step_by(50) {
                let anchor = keeper_anchor(Vector2::new(x as f64, y as f64), &field);
                assert!((0.0..=150.0).contains(&anchor.x), "{anchor:?}");
                assert!((150.0..=450.0).contains(&anchor.y), "{anchor:?}");
            }
        }
    }

    #[test]
    fn test_inverted_box_does_not_panic() {
        let field = FieldGeometry {
            penalty_box_width: -20.0,
            ..FieldGeometry::default()
        };
        let anchor = keeper_anchor(Vector2::new(5.0, 0.0), &field);
        assert!((-20.0..=0.0).contains(&anchor.x), "{anchor:?}");
        assert_relative_eq!(anchor.y, 450.0, epsilon = 1e-9);
    }

    fn keeper_command(keeper: Vector2, ball: Vector2) -> Command {
        let settings = Settings::default();
        let world = WorldSnapshot::new(
            vec![AgentState::new(0, Team::Own, keeper)],
            BallState::at_rest(ball),
        );
        let roles = RoleAssignment::new();
        let situation = Situation::new(&world, &settings.field, &roles, &settings);
        goalkeeper(&situation, &world.agents[0])
    }

    #[test]
    fn test_keeper_clears_ball() {
        let cmd = keeper_command(Vector2::new(100.0, 300.0), Vector2::new(110.0, 300.0));
        assert_eq!(cmd.movement(), Vector2::zeros());
        assert_eq!(cmd.action(), Some(Vector2::new(1.0, 0.0)));
    }

    #[test]
    fn test_keeper_moves_to_anchor() {
        let cmd = keeper_command(Vector2::new(50.0, 300.0), Vector2::new(600.0, 300.0));
        assert!(cmd.action().is_none());
        assert_relative_eq!(cmd.movement().x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(cmd.movement().y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_keeper_settles_on_anchor() {
        let cmd = keeper_command(Vector2::new(149.8, 300.0), Vector2::new(600.0, 300.0));
        assert!(cmd.movement().norm() < 1.0);
    }
}
