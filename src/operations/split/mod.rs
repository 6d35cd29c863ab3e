mod apply;
mod collect;
mod rebuild;

pub use apply::ApplySplit;
pub use collect::{CollectSplitPoints, SplitPointSet};
pub use rebuild::{RebuildSegments, Rebuilt};

use crate::config::SplitConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{OperationError, Result};
use crate::host::WallHost;
use crate::network::{ElementId, Room, WallId, WallNetwork};

/// The decided replacement of one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    /// The wall to retire.
    pub wall: WallId,
    /// Its host element id.
    pub element: ElementId,
    /// The chain of segments that replaces it.
    pub rebuilt: Rebuilt,
}

/// What happened to one wall during a split pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRecord {
    /// The retired wall.
    pub parent: ElementId,
    /// The walls created in its place, in chain order.
    pub children: Vec<ElementId>,
}

/// Result of a split pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutcome {
    /// One record per wall that was split.
    pub records: Vec<SplitRecord>,
    /// Recoverable problems met along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Splits every wall of a network at its crossings with other walls and at
/// the points where room boundaries start on it.
///
/// All split decisions are taken against the network as it was before the
/// pass; they are then applied as one batch to a working copy, committed
/// through the host, and only then swapped into the caller's network.
pub struct SplitWalls<'a> {
    rooms: &'a [Room],
    config: SplitConfig,
}

impl<'a> SplitWalls<'a> {
    /// Creates a new `SplitWalls` operation.
    #[must_use]
    pub fn new(rooms: &'a [Room], config: SplitConfig) -> Self {
        Self { rooms, config }
    }

    /// Decides the replacement chain of every wall that needs cutting,
    /// without touching the network.
    ///
    /// Walls whose chain is the wall itself are left out, as are walls
    /// whose every piece falls below the minimum length.
    ///
    /// # Errors
    ///
    /// Returns an error if the network is internally inconsistent.
    pub fn plan(&self, network: &WallNetwork) -> Result<(Vec<SplitPlan>, Vec<Diagnostic>)> {
        let tol = self.config.tolerance();
        let mut plans = Vec::new();
        let mut diagnostics = Vec::new();

        for wall in network.wall_ids() {
            let data = network.wall(wall)?;
            let points = CollectSplitPoints::new(wall, self.rooms, self.config).execute(network)?;
            let rebuilt = RebuildSegments::new(&data.segment, &points, self.config).execute();

            let kept = !rebuilt.segments.is_empty() && !rebuilt.is_unchanged(&data.segment, tol);
            if rebuilt.dropped > 0 {
                let reason = if kept {
                    format!(
                        "{} piece(s) shorter than {} dropped",
                        rebuilt.dropped,
                        self.config.min_length()
                    )
                } else {
                    format!(
                        "every piece shorter than {}, wall left intact",
                        self.config.min_length()
                    )
                };
                let d = Diagnostic::GeometryDegenerate {
                    wall: data.element,
                    reason,
                };
                d.log();
                diagnostics.push(d);
            }
            if !kept {
                continue;
            }

            tracing::debug!(
                "Wall {}: {} cut point(s), {} segment(s)",
                data.element,
                points.len(),
                rebuilt.segments.len()
            );
            plans.push(SplitPlan {
                wall,
                element: data.element,
                rebuilt,
            });
        }

        Ok((plans, diagnostics))
    }

    /// Executes the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to retire a wall or to commit the
    /// batch; `network` is then left exactly as it was.
    pub fn execute<H: WallHost + ?Sized>(
        &self,
        network: &mut WallNetwork,
        host: &mut H,
    ) -> Result<SplitOutcome> {
        let mut diagnostics = self.check_loops();
        let (plans, planning) = self.plan(network)?;
        diagnostics.extend(planning);

        let mut working = network.clone();
        let mut records = Vec::with_capacity(plans.len());
        for plan in &plans {
            let children = ApplySplit::new(plan.wall, &plan.rebuilt.segments).execute(
                &mut working,
                &mut *host,
                &mut diagnostics,
            )?;
            records.push(SplitRecord {
                parent: plan.element,
                children,
            });
        }

        host.commit().map_err(OperationError::from)?;
        *network = working;

        tracing::info!(
            "Split {} wall(s) into {} ({} live walls, {} diagnostics)",
            records.len(),
            records.iter().map(|r| r.children.len()).sum::<usize>(),
            network.len(),
            diagnostics.len()
        );

        Ok(SplitOutcome {
            records,
            diagnostics,
        })
    }

    fn check_loops(&self) -> Vec<Diagnostic> {
        let tol = self.config.tolerance();
        let mut diagnostics = Vec::new();
        for room in self.rooms {
            for (loop_index, boundary) in room.loops.iter().enumerate() {
                if !boundary.is_closed(tol) {
                    let d = Diagnostic::OpenBoundaryLoop {
                        room: room.number.clone(),
                        loop_index,
                    };
                    d.log();
                    diagnostics.push(d);
                }
            }
        }
        diagnostics
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{HostError, TopologyError, WallSplitError};
    use crate::geometry::Segment;
    use crate::host::AcceptAll;
    use crate::math::Point2;
    use crate::network::{BoundaryEntry, BoundaryLoop, WallAttributes, WallData};
    use approx::assert_abs_diff_eq;

    struct FailingCommit;

    impl WallHost for FailingCommit {
        fn create_wall(
            &mut self,
            _element: ElementId,
            _segment: &Segment,
            _attributes: &WallAttributes,
        ) -> std::result::Result<(), HostError> {
            Ok(())
        }

        fn retire_wall(&mut self, _element: ElementId) -> std::result::Result<(), HostError> {
            Ok(())
        }

        fn commit(&mut self) -> std::result::Result<(), HostError> {
            Err(HostError::new("transaction rolled back"))
        }
    }

    struct FailingRetire {
        created: usize,
    }

    impl WallHost for FailingRetire {
        fn create_wall(
            &mut self,
            _element: ElementId,
            _segment: &Segment,
            _attributes: &WallAttributes,
        ) -> std::result::Result<(), HostError> {
            self.created += 1;
            Ok(())
        }

        fn retire_wall(&mut self, _element: ElementId) -> std::result::Result<(), HostError> {
            Err(HostError::new("wall is pinned"))
        }
    }

    fn add(net: &mut WallNetwork, element: u64, a: (f64, f64), b: (f64, f64)) {
        net.add_wall(WallData::new(
            ElementId(element),
            Segment::new(Point2::new(a.0, a.1), Point2::new(b.0, b.1)).unwrap(),
            WallAttributes::new(ElementId(100), ElementId(200), 10.0),
        ))
        .unwrap();
    }

    fn cross() -> WallNetwork {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (10.0, 0.0));
        add(&mut net, 2, (5.0, -5.0), (5.0, 5.0));
        net
    }

    #[test]
    fn crossing_walls_split_each_other() {
        let mut net = cross();
        let outcome = SplitWalls::new(&[], SplitConfig::default())
            .execute(&mut net, &mut AcceptAll)
            .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(net.len(), 4);
        assert!(net.wall_by_element(ElementId(1)).is_err());
        assert!(net.wall_by_element(ElementId(2)).is_err());

        let first = &outcome.records[0];
        assert_eq!(first.parent, ElementId(1));
        let (_, left) = net.wall_by_element(first.children[0]).unwrap();
        let (_, right) = net.wall_by_element(first.children[1]).unwrap();
        assert_abs_diff_eq!(left.segment.end().x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.segment.start().x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.segment.end().x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn plan_does_not_mutate() {
        let net = cross();
        let (plans, diagnostics) = SplitWalls::new(&[], SplitConfig::default())
            .plan(&net)
            .unwrap();
        assert_eq!(plans.len(), 2);
        assert!(diagnostics.is_empty());
        assert_eq!(net.len(), 2);
    }

    #[test]
    fn untouched_walls_keep_their_ids() {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (10.0, 0.0));
        add(&mut net, 2, (0.0, 5.0), (10.0, 5.0));
        let outcome = SplitWalls::new(&[], SplitConfig::default())
            .execute(&mut net, &mut AcceptAll)
            .unwrap();

        assert!(outcome.records.is_empty());
        assert!(net.wall_by_element(ElementId(1)).is_ok());
        assert!(net.wall_by_element(ElementId(2)).is_ok());
    }

    #[test]
    fn failed_commit_leaves_network_untouched() {
        let mut net = cross();
        let err = SplitWalls::new(&[], SplitConfig::default())
            .execute(&mut net, &mut FailingCommit)
            .unwrap_err();

        assert!(matches!(err, WallSplitError::Operation(OperationError::HostFailure(_))));
        assert_eq!(net.len(), 2);
        assert!(net.wall_by_element(ElementId(1)).is_ok());
        assert!(!net.is_retired(ElementId(1)));
    }

    #[test]
    fn failed_retire_aborts_batch() {
        let mut net = cross();
        let mut host = FailingRetire { created: 0 };
        let err = SplitWalls::new(&[], SplitConfig::default())
            .execute(&mut net, &mut host)
            .unwrap_err();

        assert!(matches!(err, WallSplitError::Operation(OperationError::HostFailure(_))));
        assert_eq!(host.created, 2);
        assert_eq!(net.len(), 2);
        for element in [ElementId(1), ElementId(2)] {
            assert!(net.wall_by_element(element).is_ok());
            assert!(!net.is_retired(element));
        }
    }

    #[test]
    fn exhausted_element_ids_abort_batch() {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (10.0, 0.0));
        add(&mut net, u64::MAX, (5.0, -5.0), (5.0, 5.0));
        let err = SplitWalls::new(&[], SplitConfig::default())
            .execute(&mut net, &mut AcceptAll)
            .unwrap_err();

        assert!(matches!(
            err,
            WallSplitError::Topology(TopologyError::ElementIdsExhausted(_))
        ));
        assert_eq!(net.len(), 2);
        assert!(net.wall_by_element(ElementId(1)).is_ok());
        assert!(net.wall_by_element(ElementId(u64::MAX)).is_ok());
        assert!(!net.is_retired(ElementId(1)));
    }

    #[test]
    fn open_loop_is_reported() {
        let mut net = cross();
        let rooms = vec![Room::new(
            "5",
            "Store",
            vec![BoundaryLoop::new(vec![BoundaryEntry::new(
                ElementId(1),
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 0.0),
            )])],
        )];
        let outcome = SplitWalls::new(&rooms, SplitConfig::default())
            .execute(&mut net, &mut AcceptAll)
            .unwrap();

        assert!(outcome.diagnostics.contains(&Diagnostic::OpenBoundaryLoop {
            room: "5".to_owned(),
            loop_index: 0,
        }));
    }

    #[test]
    fn dropped_pieces_are_reported() {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (10.0, 0.0));
        add(&mut net, 2, (5.0, -5.0), (5.0, 5.0));
        add(&mut net, 3, (5.05, -5.0), (5.05, 5.0));
        let config = SplitConfig::new(1e-3, 0.1).unwrap();
        let outcome = SplitWalls::new(&[], config)
            .execute(&mut net, &mut AcceptAll)
            .unwrap();

        let record = outcome.records.iter().find(|r| r.parent == ElementId(1)).unwrap();
        assert_eq!(record.children.len(), 2);
        assert!(outcome.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::GeometryDegenerate { wall: ElementId(1), reason }
                if reason.contains("dropped")
        )));
    }

    #[test]
    fn wall_left_intact_when_every_piece_is_short() {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (10.0, 0.0));
        add(&mut net, 2, (5.0, -5.0), (5.0, 5.0));
        add(&mut net, 3, (5.05, -5.0), (5.05, 5.0));
        let config = SplitConfig::new(1e-3, 6.0).unwrap();
        let outcome = SplitWalls::new(&[], config)
            .execute(&mut net, &mut AcceptAll)
            .unwrap();

        assert!(outcome.records.iter().all(|r| r.parent != ElementId(1)));
        assert!(net.wall_by_element(ElementId(1)).is_ok());
        let reasons: Vec<&str> = outcome
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::GeometryDegenerate { wall: ElementId(1), reason } => {
                    Some(reason.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("left intact"));
        assert!(!reasons[0].contains("dropped"));
    }
}
