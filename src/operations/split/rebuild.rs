use crate::config::SplitConfig;
use crate::geometry::Segment;
use crate::math::{points_coincide, Point2};

use super::collect::SplitPointSet;

/// The ordered chain of sub-segments produced for one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Rebuilt {
    /// Sub-segments from the wall's start to its end.
    pub segments: Vec<Segment>,
    /// Pieces dropped for being shorter than the minimum length.
    pub dropped: usize,
}

impl Rebuilt {
    /// Returns `true` if the chain is just `original`, uncut.
    #[must_use]
    pub fn is_unchanged(&self, original: &Segment, tolerance: f64) -> bool {
        matches!(self.segments.as_slice(), [only] if only.coincides_with(original, tolerance))
    }
}

/// Orders a wall's cut points along its line and emits the sub-segments
/// between consecutive stations.
pub struct RebuildSegments<'a> {
    segment: &'a Segment,
    points: &'a SplitPointSet,
    config: SplitConfig,
}

impl<'a> RebuildSegments<'a> {
    /// Creates a new `RebuildSegments` operation.
    #[must_use]
    pub fn new(segment: &'a Segment, points: &'a SplitPointSet, config: SplitConfig) -> Self {
        Self {
            segment,
            points,
            config,
        }
    }

    /// Executes the rebuild.
    ///
    /// With no cut points the result is the original segment. Pieces whose
    /// ends coincide or that are shorter than the configured minimum length
    /// are dropped. If that would leave nothing, the original segment is
    /// returned so a wall never vanishes.
    #[must_use]
    pub fn execute(&self) -> Rebuilt {
        if self.points.is_empty() {
            return Rebuilt {
                segments: vec![*self.segment],
                dropped: 0,
            };
        }

        let tol = self.config.tolerance();
        let min_length = self.config.min_length();

        let mut stations: Vec<(f64, Point2)> = Vec::with_capacity(self.points.len() + 2);
        stations.push((0.0, *self.segment.start()));
        stations.extend(
            self.points
                .as_slice()
                .iter()
                .map(|p| (self.segment.parameter_of(p), *p)),
        );
        stations.push((1.0, *self.segment.end()));
        // Stable: equal parameters keep insertion order.
        stations.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut segments = Vec::with_capacity(stations.len() - 1);
        let mut dropped = 0;
        for pair in stations.windows(2) {
            let (p, q) = (pair[0].1, pair[1].1);
            if points_coincide(&p, &q, tol) || nalgebra::distance(&p, &q) < min_length {
                dropped += 1;
                continue;
            }
            match Segment::with_tolerance(p, q, tol) {
                Ok(s) => segments.push(s),
                Err(_) => dropped += 1,
            }
        }

        if segments.is_empty() && self.segment.length() >= min_length {
            segments.push(*self.segment);
        }

        Rebuilt { segments, dropped }
    }
}
