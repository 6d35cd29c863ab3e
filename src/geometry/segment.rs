use crate::config::SplitConfig;
use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{segment_segment_intersect_2d, SegmentIntersection};
use crate::math::{points_coincide, Point2, Vector2, TOLERANCE};

/// A bounded straight segment from `start` to `end`.
///
/// The parametric form is `P(t) = start + t * (end - start)`, so `t = 0` is
/// the start and `t = 1` the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a segment, rejecting endpoints closer than [`TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the endpoints coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        Self::with_tolerance(start, end, TOLERANCE)
    }

    /// Creates a segment, rejecting endpoints closer than `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the endpoints coincide.
    pub fn with_tolerance(start: Point2, end: Point2, tolerance: f64) -> Result<Self> {
        if !(start.coords.iter().chain(end.coords.iter()).all(|c| c.is_finite())) {
            return Err(GeometryError::Degenerate(
                "segment has non-finite coordinates".to_owned(),
            )
            .into());
        }
        if points_coincide(&start, &end, tolerance) {
            return Err(GeometryError::Degenerate(format!(
                "segment endpoints ({:.4}, {:.4}) and ({:.4}, {:.4}) coincide",
                start.x, start.y, end.x, end.y
            ))
            .into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.vector() / self.length()
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Evaluates the segment's supporting line at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.vector() * t
    }

    /// Projects `p` onto the supporting line, returning its parameter.
    ///
    /// The result is not clamped: points before the start give `t < 0`,
    /// points past the end give `t > 1`.
    #[must_use]
    pub fn parameter_of(&self, p: &Point2) -> f64 {
        let v = self.vector();
        (p - self.start).dot(&v) / v.norm_squared()
    }

    /// Minimum distance from `p` to the bounded segment.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        let t = self.parameter_of(p).clamp(0.0, 1.0);
        nalgebra::distance(p, &self.point_at(t))
    }

    /// Returns `true` if both endpoints match `other`'s within `tolerance`.
    #[must_use]
    pub fn coincides_with(&self, other: &Self, tolerance: f64) -> bool {
        points_coincide(&self.start, &other.start, tolerance)
            && points_coincide(&self.end, &other.end, tolerance)
    }

    /// Intersects this segment with `other`.
    #[must_use]
    pub fn intersect(&self, other: &Self, config: &SplitConfig) -> SegmentIntersection {
        segment_segment_intersect_2d(
            &self.start,
            &self.end,
            &other.start,
            &other.end,
            config.tolerance(),
            config.parallel_tolerance(),
        )
    }
}
