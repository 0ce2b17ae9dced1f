use thiserror::Error;

pub type Vector2 = nalgebra::Vector2<f64>;

/// Vectors shorter than this have no usable direction.
pub const DEGENERATE_EPS: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot normalize a vector of length {0}")]
    DegenerateVector(f64),
}

/// Checked vector operations used throughout the engine.
///
/// nalgebra's own `normalize` happily returns NaN for a zero vector; every
/// direction the engine emits goes through these helpers instead.
pub trait VectorExt {
    /// Normalize, failing with [`GeometryError::DegenerateVector`] when the norm is
    /// below [`DEGENERATE_EPS`] or not finite.
    fn try_unit(&self) -> Result<Vector2, GeometryError>;

    /// Normalize, or return `fallback` if the vector has no direction.
    fn unit_or(&self, fallback: Vector2) -> Vector2;

    /// Scale the vector down to unit length if it is longer than 1. Non-finite
    /// vectors become zero.
    fn clamp_unit(&self) -> Vector2;

    /// Scalar 2D cross product (`ax * by - ay * bx`).
    fn cross2(&self, other: &Vector2) -> f64;

    fn all_finite(&self) -> bool;
}

impl VectorExt for Vector2 {
    fn try_unit(&self) -> Result<Vector2, GeometryError> {
        let norm = self.norm();
        if !norm.is_finite() || norm < DEGENERATE_EPS {
            return Err(GeometryError::DegenerateVector(norm));
        }
        Ok(self / norm)
    }

    fn unit_or(&self, fallback: Vector2) -> Vector2 {
        self.try_unit().unwrap_or(fallback)
    }

    fn clamp_unit(&self) -> Vector2 {
        if !self.all_finite() {
            return Vector2::zeros();
        }
        let norm = self.norm();
        if norm > 1.0 {
            self / norm
        } else {
            *self
        }
    }

    fn cross2(&self, other: &Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    fn all_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Finds the intersection point of two lines.
///
/// Each line is defined by a point and a direction vector. Returns None if the lines
/// are parallel.
pub fn find_intersection(
    point1: Vector2,
    direction1: Vector2,
    point2: Vector2,
    direction2: Vector2,
) -> Option<Vector2> {
    let det = direction1.cross2(&direction2);
    if det.abs() < 1e-10 {
        return None;
    }

    let dp = point2 - point1;
    let t = dp.cross2(&direction2) / det;
    Some(point1 + t * direction1)
}
