use tactica_core::{Vector2, VectorExt, DEGENERATE_EPS};

/// A straight segment between two points, e.g. a shot or a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vector2,
    pub end: Vector2,
}

impl Segment {
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Whether `body` lies within `clearance` of the segment.
    ///
    /// Only bodies whose projection falls strictly between the endpoints count, so
    /// something right behind the start or past the end never blocks.
    pub fn is_blocked_by(&self, body: Vector2, clearance: f64) -> bool {
        let delta = self.end - self.start;
        let length_sq = delta.dot(&delta);
        if length_sq.sqrt() < DEGENERATE_EPS {
            return false;
        }

        // A body on either endpoint lands exactly on 0 or `length_sq`
        let to_body = body - self.start;
        let along = to_body.dot(&delta);
        if along <= 0.0 || along >= length_sq {
            return false;
        }

        to_body.cross2(&delta).abs() / length_sq.sqrt() < clearance
    }
}

/// Checks whether any of `bodies` is within `clearance` of the segment from `start`
/// to `end`.
///
/// Segments shorter than [`DEGENERATE_EPS`] are never blocked. The result does not
/// depend on the order of `bodies` nor on the direction of the segment.
pub fn is_segment_blocked<'a>(
    start: Vector2,
    end: Vector2,
    bodies: impl IntoIterator<Item = &'a Vector2>,
    clearance: f64,
) -> bool {
    let segment = Segment::new(start, end);
    if segment.length() < DEGENERATE_EPS {
        return false;
    }
    bodies
        .into_iter()
        .any(|body| segment.is_blocked_by(*body, clearance))
}

/// Distance from `point` to the closest of `bodies`, infinite if there are none.
pub fn nearest_distance<'a>(point: Vector2, bodies: impl IntoIterator<Item = &'a Vector2>) -> f64 {
    bodies
        .into_iter()
        .map(|body| (body - point).norm())
        .fold(f64::INFINITY, f64::min)
}

/// Number of `bodies` within `radius` of `point`.
pub fn count_within<'a>(
    point: Vector2,
    bodies: impl IntoIterator<Item = &'a Vector2>,
    radius: f64,
) -> usize {
    bodies
        .into_iter()
        .filter(|body| (*body - point).norm() <= radius)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn test_body_on_line_blocks() {
        let bodies = [v(50.0, 2.0)];
        assert!(is_segment_blocked(v(0.0, 0.0), v(100.0, 0.0), &bodies, 10.0));
    }

    #[test]
    fn test_body_off_line_is_clear() {
        let bodies = [v(50.0, 12.0)];
        assert!(!is_segment_blocked(v(0.0, 0.0), v(100.0, 0.0), &bodies, 10.0));
    }

    #[test]
    fn test_bodies_behind_or_past_never_block() {
        let bodies = [v(-5.0, 0.0), v(105.0, 0.0), v(0.0, 0.0), v(100.0, 0.0)];
        assert!(!is_segment_blocked(v(0.0, 0.0), v(100.0, 0.0), &bodies, 10.0));
    }

    #[test]
    fn test_clearance_is_strict() {
        let bodies = [v(50.0, 10.0)];
        assert!(!is_segment_blocked(v(0.0, 0.0), v(100.0, 0.0), &bodies, 10.0));
    }

    #[test]
    fn test_zero_length_segment_is_clear() {
        let bodies = [v(0.0, 0.0)];
        assert!(!is_segment_blocked(v(0.0, 0.0), v(0.0, 0.0), &bodies, 10.0));
    }

    #[test]
    fn test_no_bodies_is_clear() {
        let bodies: [Vector2; 0] = [];
        assert!(!is_segment_blocked(v(0.0, 0.0), v(10.0, 10.0), &bodies, 10.0));
    }

    #[test]
    fn test_symmetric_in_direction() {
        let bodies = [v(30.0, 25.0), v(70.0, 80.0), v(-10.0, -10.0), v(95.0, 101.0)];
        let cases = [
            (v(0.0, 0.0), v(100.0, 100.0)),
            (v(10.0, 90.0), v(90.0, 10.0)),
            (v(0.0, 50.0), v(100.0, 50.0)),
            (v(60.0, 60.0), v(70.0, 90.0)),
        ];
        for (a, b) in cases {
            for clearance in [1.0, 5.0, 20.0] {
                assert_eq!(
                    is_segment_blocked(a, b, &bodies, clearance),
                    is_segment_blocked(b, a, &bodies, clearance),
                    "segment {a:?} -> {b:?}, clearance {clearance}"
                );
            }
        }
    }

    #[test]
    fn test_bodies_on_endpoints_never_block_at_any_angle() {
        for i in 1..60 {
            for j in 1..60 {
                let (i, j) = (i as f64, j as f64);
                let a = v(0.37 * i, 0.0);
                let b = v(13.1 + 0.71 * j, 7.3 + 0.29 * i * j);
                let bodies = [a, b];
                assert!(!is_segment_blocked(a, b, &bodies, 10.0), "{a:?} -> {b:?}");
                assert!(!is_segment_blocked(b, a, &bodies, 10.0), "{b:?} -> {a:?}");
            }
        }
    }

    #[test]
    fn test_order_independent() {
        let mut bodies = vec![v(200.0, 0.0), v(50.0, 3.0), v(50.0, 40.0)];
        let blocked = is_segment_blocked(v(0.0, 0.0), v(100.0, 0.0), &bodies, 10.0);
        bodies.reverse();
        assert_eq!(
            blocked,
            is_segment_blocked(v(0.0, 0.0), v(100.0, 0.0), &bodies, 10.0)
        );
        assert!(blocked);
    }

    #[test]
    fn test_nearest_distance() {
        let bodies = [v(3.0, 4.0), v(10.0, 0.0)];
        assert_eq!(nearest_distance(v(0.0, 0.0), &bodies), 5.0);
        assert_eq!(nearest_distance(v(0.0, 0.0), &[] as &[Vector2]), f64::INFINITY);
    }

    #[test]
    fn test_count_within() {
        let bodies = [v(3.0, 4.0), v(10.0, 0.0), v(100.0, 0.0)];
        assert_eq!(count_within(v(0.0, 0.0), &bodies, 10.0), 2);
    }
}
