use tactica_core::{FieldGeometry, Vector2, VectorExt, DEGENERATE_EPS};

use crate::obstruction::is_segment_blocked;

/// One of the four field boundaries, in the order bank shots are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    /// `y = 0`
    Top,
    /// `y = height`
    Bottom,
    /// `x = 0`
    Left,
    /// `x = width`
    Right,
}

impl Wall {
    pub const PRIORITY: [Wall; 4] = [Wall::Top, Wall::Bottom, Wall::Left, Wall::Right];

    /// Perpendicular distance from `p` to the wall.
    fn distance(&self, p: Vector2, field: &FieldGeometry) -> f64 {
        match self {
            Wall::Top => p.y,
            Wall::Bottom => field.height - p.y,
            Wall::Left => p.x,
            Wall::Right => field.width - p.x,
        }
    }

    /// Length of the wall's extent perpendicular to it, i.e. how far the opposite
    /// wall is.
    fn span(&self, field: &FieldGeometry) -> f64 {
        match self {
            Wall::Top | Wall::Bottom => field.height,
            Wall::Left | Wall::Right => field.width,
        }
    }

    /// Point on the wall at coordinate `along` (x for top/bottom, y for left/right),
    /// or `None` if it falls outside the wall segment.
    fn point_at(&self, along: f64, field: &FieldGeometry) -> Option<Vector2> {
        let p = match self {
            Wall::Top => Vector2::new(along, 0.0),
            Wall::Bottom => Vector2::new(along, field.height),
            Wall::Left => Vector2::new(0.0, along),
            Wall::Right => Vector2::new(field.width, along),
        };
        field.contains(p).then_some(p)
    }

    fn along(&self, p: Vector2) -> f64 {
        match self {
            Wall::Top | Wall::Bottom => p.x,
            Wall::Left | Wall::Right => p.y,
        }
    }
}

/// Where obstruction tests get their blockers and margins from.
#[derive(Debug, Clone, Copy)]
pub struct ShotConstraints<'a> {
    /// Bodies that can block the ball. With `None` every line counts as open.
    pub blockers: Option<&'a [Vector2]>,
    /// Minimum distance blockers must keep from the ball's path.
    pub clearance: f64,
    /// A wall is not used when the shooter is within this fraction of the field from
    /// it.
    pub wall_margin: f64,
}

impl<'a> ShotConstraints<'a> {
    pub fn new(blockers: &'a [Vector2], clearance: f64, wall_margin: f64) -> Self {
        Self {
            blockers: Some(blockers),
            clearance,
            wall_margin,
        }
    }

    /// No blockers, default wall margin.
    pub fn unobstructed(wall_margin: f64) -> Self {
        Self {
            blockers: None,
            clearance: 0.0,
            wall_margin,
        }
    }

    pub fn is_clear(&self, start: Vector2, end: Vector2) -> bool {
        match self.blockers {
            Some(blockers) => !is_segment_blocked(start, end, blockers, self.clearance),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotKind {
    /// Off `wall`, touching it at `bounce`.
    Bank { wall: Wall, bounce: Vector2 },
    /// Straight at the target.
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSolution {
    /// Unit vector the ball has to be kicked along.
    pub direction: Vector2,
    pub kind: ShotKind,
}

/// Computes the point on `wall` where a ball from `shooter` has to bounce to reach
/// `target`, using the mirror-image construction.
///
/// Returns `None` when the shooter is too close to the wall, when the target lies on
/// it, or when the bounce point falls outside the wall segment.
pub fn reflection_point(
    wall: Wall,
    shooter: Vector2,
    target: Vector2,
    field: &FieldGeometry,
    wall_margin: f64,
) -> Option<Vector2> {
    let d_shooter = wall.distance(shooter, field);
    let d_target = wall.distance(target, field);

    if d_shooter <= wall_margin * wall.span(field) || d_target.abs() < DEGENERATE_EPS {
        return None;
    }
    let total = d_shooter + d_target;
    if total.abs() < DEGENERATE_EPS {
        return None;
    }

    let along = (wall.along(target) * d_shooter + wall.along(shooter) * d_target) / total;
    if !along.is_finite() {
        return None;
    }
    wall.point_at(along, field)
}

/// Finds a shot from `shooter` to `target`, preferring single-wall bank shots in
/// [`Wall::PRIORITY`] order and falling back to the direct line.
///
/// Only the shooter→bounce leg is checked for blockers. Returns `None` if every
/// option is blocked.
pub fn find_bank_shot(
    shooter: Vector2,
    target: Vector2,
    field: &FieldGeometry,
    constraints: &ShotConstraints,
) -> Option<ShotSolution> {
    for wall in Wall::PRIORITY {
        let Some(bounce) = reflection_point(wall, shooter, target, field, constraints.wall_margin)
        else {
            continue;
        };
        let Ok(direction) = (bounce - shooter).try_unit() else {
            continue;
        };
        if constraints.is_clear(shooter, bounce) {
            log::trace!("bank shot off {wall:?} at {bounce:?}");
            return Some(ShotSolution {
                direction,
                kind: ShotKind::Bank { wall, bounce },
            });
        }
    }

    direct_shot(shooter, target, constraints)
}

/// The straight shot from `shooter` to `target`, if it is open.
pub fn direct_shot(
    shooter: Vector2,
    target: Vector2,
    constraints: &ShotConstraints,
) -> Option<ShotSolution> {
    let direction = (target - shooter).try_unit().ok()?;
    constraints
        .is_clear(shooter, target)
        .then_some(ShotSolution {
            direction,
            kind: ShotKind::Direct,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field(width: f64, height: f64) -> FieldGeometry {
        FieldGeometry {
            width,
            height,
            own_goal_center: Vector2::new(0.0, height / 2.0),
            opponent_goal_center: Vector2::new(width, height / 2.0),
            ..FieldGeometry::default()
        }
    }

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn test_open_field_bounces_off_top() {
        let field = field(500.0, 300.0);
        let shooter = v(100.0, 150.0);
        let target = v(400.0, 150.0);
        let constraints = ShotConstraints::unobstructed(0.3);

        let shot = find_bank_shot(shooter, target, &field, &constraints).unwrap();
        let ShotKind::Bank { wall, bounce } = shot.kind else {
            panic!("expected a bank shot, got {:?}", shot.kind);
        };
        assert!(matches!(wall, Wall::Top | Wall::Bottom));
        assert_relative_eq!(bounce.x, 250.0, epsilon = 1e-9);
        assert!(bounce.y == 0.0 || bounce.y == 300.0);
        assert_relative_eq!(shot.direction.norm(), 1.0, epsilon = 1e-12);

        // The straight line is open as well
        let direct = direct_shot(shooter, target, &ShotConstraints::new(&[], 37.5, 0.3)).unwrap();
        assert_eq!(direct.kind, ShotKind::Direct);
        assert_relative_eq!(direct.direction.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reflection_angles_are_equal() {
        let field = field(1000.0, 600.0);
        let shooter = v(200.0, 400.0);
        let target = v(900.0, 250.0);
        let bounce = reflection_point(Wall::Top, shooter, target, &field, 0.3).unwrap();

        let incoming = (bounce - shooter).normalize();
        let outgoing = (target - bounce).normalize();
        // Reflection off y = 0 flips the y component only
        assert_relative_eq!(incoming.x, outgoing.x, epsilon = 1e-9);
        assert_relative_eq!(incoming.y, -outgoing.y, epsilon = 1e-9);
    }

    #[test]
    fn test_bottom_wall_reflection() {
        let field = field(1000.0, 600.0);
        let shooter = v(200.0, 100.0);
        let target = v(800.0, 300.0);
        let bounce = reflection_point(Wall::Bottom, shooter, target, &field, 0.3).unwrap();
        assert_eq!(bounce.y, 600.0);

        let incoming = (bounce - shooter).normalize();
        let outgoing = (target - bounce).normalize();
        assert_relative_eq!(incoming.x, outgoing.x, epsilon = 1e-9);
        assert_relative_eq!(incoming.y, -outgoing.y, epsilon = 1e-9);
    }

    #[test]
    fn test_side_wall_reflection() {
        let field = field(1000.0, 600.0);
        let shooter = v(600.0, 100.0);
        let target = v(400.0, 500.0);
        let bounce = reflection_point(Wall::Left, shooter, target, &field, 0.3).unwrap();
        assert_eq!(bounce.x, 0.0);

        let incoming = (bounce - shooter).normalize();
        let outgoing = (target - bounce).normalize();
        assert_relative_eq!(incoming.x, -outgoing.x, epsilon = 1e-9);
        assert_relative_eq!(incoming.y, outgoing.y, epsilon = 1e-9);
    }

    #[test]
    fn test_shooter_near_wall_skips_it() {
        let field = field(1000.0, 600.0);
        // 0.3 * 600 = 180 from the top wall
        assert!(reflection_point(Wall::Top, v(500.0, 150.0), v(900.0, 300.0), &field, 0.3).is_none());
        assert!(reflection_point(Wall::Top, v(500.0, 200.0), v(900.0, 300.0), &field, 0.3).is_some());
    }

    #[test]
    fn test_target_on_wall_skips_it() {
        let field = field(1000.0, 600.0);
        let corner = v(1000.0, 0.0);
        assert!(reflection_point(Wall::Top, v(500.0, 300.0), corner, &field, 0.3).is_none());
        assert!(reflection_point(Wall::Right, v(500.0, 300.0), corner, &field, 0.3).is_none());
    }

    #[test]
    fn test_blocked_wall_falls_through_to_next() {
        let field = field(500.0, 300.0);
        let shooter = v(100.0, 150.0);
        let target = v(400.0, 150.0);
        // Sits on the way to the top wall bounce at (250, 0)
        let blockers = [v(175.0, 75.0)];
        let constraints = ShotConstraints::new(&blockers, 10.0, 0.3);

        let shot = find_bank_shot(shooter, target, &field, &constraints).unwrap();
        assert!(matches!(shot.kind, ShotKind::Bank { wall: Wall::Bottom, .. }));
    }

    #[test]
    fn test_falls_back_to_direct() {
        let field = field(500.0, 300.0);
        let shooter = v(100.0, 150.0);
        let target = v(400.0, 150.0);
        let blockers = [v(175.0, 75.0), v(175.0, 225.0), v(450.0, 150.0)];
        let constraints = ShotConstraints::new(&blockers, 10.0, 0.3);

        let shot = find_bank_shot(shooter, target, &field, &constraints).unwrap();
        assert_eq!(shot.kind, ShotKind::Direct);
    }

    #[test]
    fn test_everything_blocked() {
        let field = field(500.0, 300.0);
        let shooter = v(100.0, 150.0);
        let target = v(400.0, 150.0);
        let blockers = [v(175.0, 75.0), v(175.0, 225.0), v(450.0, 150.0), v(250.0, 150.0)];
        let constraints = ShotConstraints::new(&blockers, 10.0, 0.3);

        assert!(find_bank_shot(shooter, target, &field, &constraints).is_none());
    }

    #[test]
    fn test_shooter_on_target_has_no_shot() {
        let field = field(500.0, 300.0);
        let p = v(250.0, 150.0);
        let constraints = ShotConstraints::new(&[], 10.0, 0.9);
        assert!(direct_shot(p, p, &constraints).is_none());
        assert!(find_bank_shot(p, p, &field, &constraints).is_none());
    }

    #[test]
    fn test_bounce_points_stay_on_field() {
        let field = field(500.0, 300.0);
        let constraints = ShotConstraints::unobstructed(0.3);
        for sx in (0..=500).step_by(50) {
            for sy in (0..=300).step_by(50) {
                for target in [v(500.0, 100.0), v(500.0, 200.0), v(0.0, 150.0), v(250.0, 0.0)] {
                    let shooter = v(sx as f64, sy as f64);
                    if let Some(ShotSolution {
                        kind: ShotKind::Bank { bounce, .. },
                        ..
                    }) = find_bank_shot(shooter, target, &field, &constraints)
                    {
                        assert!(field.contains(bounce), "{bounce:?} from {shooter:?}");
                    }
                }
            }
        }
    }
}
