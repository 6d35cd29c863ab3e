use super::{cross_2d, Point2, Vector2, PARAM_TOLERANCE};

/// Result of intersecting two bounded segments.
///
/// Enumerate the points with [`SegmentIntersection::points`] or by iterating
/// the value directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments do not meet.
    None,
    /// The segments meet at a single point.
    Point(Point2),
    /// The segments are collinear and share the span between two points.
    Overlap(Point2, Point2),
}

impl SegmentIntersection {
    /// Returns `true` when the segments do not meet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Iterates over the intersection points (0, 1 or 2 of them).
    pub fn points(&self) -> impl Iterator<Item = Point2> {
        (*self).into_iter()
    }
}

impl IntoIterator for SegmentIntersection {
    type Item = Point2;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Point2>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        let slots = match self {
            Self::None => [None, None],
            Self::Point(p) => [Some(p), None],
            Self::Overlap(p, q) => [Some(p), Some(q)],
        };
        slots.into_iter().flatten()
    }
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Directions are compared after normalization, so `parallel_tolerance` is
/// the sine of the smallest angle still considered a crossing.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    parallel_tolerance: f64,
) -> Option<(f64, f64)> {
    let scale = d1.norm() * d2.norm();
    if scale == 0.0 {
        return None;
    }
    let cross = cross_2d(d1, d2);
    if (cross / scale).abs() < parallel_tolerance {
        return None;
    }
    let w = p2 - p1;
    let t = cross_2d(&w, d2) / cross;
    let u = cross_2d(&w, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Endpoint contact counts as an intersection. Collinear segments whose
/// supporting lines lie within `tolerance` of each other yield the ends of
/// their shared span; near-parallel segments that are not collinear yield
/// nothing.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
    parallel_tolerance: f64,
) -> SegmentIntersection {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a = da.norm();
    if len_a < tolerance || db.norm() < tolerance {
        return SegmentIntersection::None;
    }

    let Some((t, u)) = line_line_intersect_2d(a0, &da, b0, &db, parallel_tolerance) else {
        return collinear_overlap(a0, &da, len_a, b0, b1, tolerance);
    };

    let in_range = |s: f64| (-PARAM_TOLERANCE..=1.0 + PARAM_TOLERANCE).contains(&s);
    if in_range(t) && in_range(u) {
        SegmentIntersection::Point(a0 + da * t.clamp(0.0, 1.0))
    } else {
        SegmentIntersection::None
    }
}

/// Shared span of two parallel segments, measured along segment A.
fn collinear_overlap(
    a0: &Point2,
    da: &Vector2,
    len_a: f64,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> SegmentIntersection {
    let offset = (cross_2d(da, &(b0 - a0)) / len_a).abs();
    if offset > tolerance {
        return SegmentIntersection::None;
    }

    let len_sq = len_a * len_a;
    let tb0 = (b0 - a0).dot(da) / len_sq;
    let tb1 = (b1 - a0).dot(da) / len_sq;
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);
    let slack = tolerance / len_a;

    if lo > hi + slack {
        SegmentIntersection::None
    } else if hi - lo < slack {
        SegmentIntersection::Point(a0 + da * lo.min(1.0))
    } else {
        SegmentIntersection::Overlap(a0 + da * lo, a0 + da * hi)
    }
}
