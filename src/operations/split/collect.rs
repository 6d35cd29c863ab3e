use crate::config::SplitConfig;
use crate::error::Result;
use crate::math::{points_coincide, Point2};
use crate::network::{Room, WallId, WallNetwork};

/// Interior points at which one wall must be cut.
///
/// No two points are within the tolerance of each other; the first point
/// inserted wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPointSet {
    points: Vec<Point2>,
    tolerance: f64,
}

impl SplitPointSet {
    /// Creates an empty set deduplicating at `tolerance`.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            points: Vec::new(),
            tolerance,
        }
    }

    /// Adds `p` unless an equal point is already present.
    ///
    /// Returns `true` if the point was added.
    pub fn insert(&mut self, p: Point2) -> bool {
        if self.contains(&p) {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Returns `true` if a point within tolerance of `p` is present.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        self.points.iter().any(|q| points_coincide(p, q, self.tolerance))
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no cut points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Point2] {
        &self.points
    }
}

/// Gathers the cut points of one wall.
///
/// Crossings with every other live wall are kept when they fall strictly
/// inside the wall, outside a guard band of one tolerance at each end.
/// Every room boundary curve that starts on this wall forces a cut at its
/// start point, snapped onto the wall's location line; those bypass the
/// guard band but never duplicate the wall's own endpoints.
pub struct CollectSplitPoints<'a> {
    wall: WallId,
    rooms: &'a [Room],
    config: SplitConfig,
}

impl<'a> CollectSplitPoints<'a> {
    /// Creates a new `CollectSplitPoints` query.
    #[must_use]
    pub fn new(wall: WallId, rooms: &'a [Room], config: SplitConfig) -> Self {
        Self {
            wall,
            rooms,
            config,
        }
    }

    /// Executes the query against the current network.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not live in the network.
    pub fn execute(&self, network: &WallNetwork) -> Result<SplitPointSet> {
        let tol = self.config.tolerance();
        let data = network.wall(self.wall)?;
        let segment = &data.segment;
        let guard = tol / segment.length();
        let mut points = SplitPointSet::new(tol);

        for other_id in network.wall_ids() {
            if other_id == self.wall {
                continue;
            }
            let other = network.wall(other_id)?;
            for p in segment.intersect(&other.segment, &self.config) {
                let t = segment.parameter_of(&p);
                if t > guard && t < 1.0 - guard {
                    points.insert(p);
                }
            }
        }

        let forced = self
            .rooms
            .iter()
            .flat_map(|room| room.entries())
            .filter(|entry| entry.wall == data.element);
        for entry in forced {
            let t = segment.parameter_of(&entry.start);
            if !(0.0..=1.0).contains(&t) {
                tracing::debug!(
                    "Boundary start ({:.3}, {:.3}) lies outside wall {} (t = {:.4})",
                    entry.start.x,
                    entry.start.y,
                    data.element,
                    t
                );
                continue;
            }
            let p = segment.point_at(t);
            if points_coincide(&p, segment.start(), tol)
                || points_coincide(&p, segment.end(), tol)
            {
                continue;
            }
            points.insert(p);
        }

        Ok(points)
    }
}
