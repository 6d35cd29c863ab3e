pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default distance tolerance, in plan length units.
///
/// Two points closer than this are the same point.
pub const TOLERANCE: f64 = 1e-3;

/// Cross product magnitude (of unit directions) below which two lines are
/// treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Slack applied to segment parameters when testing `[0, 1]` membership.
pub const PARAM_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `a` and `b` are within `tolerance` of each other.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    nalgebra::distance_squared(a, b) < tolerance * tolerance
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
