mod csv;
mod orientation;

pub use csv::{write_csv, HEADER};
pub use orientation::Orientation;

use crate::config::SplitConfig;
use crate::diagnostics::Diagnostic;
use crate::network::{BoundaryEntry, ElementId, Room, WallData, WallNetwork};

/// One wall bounding one room.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Number of the bounded room.
    pub room_number: String,
    /// Name of the bounded room.
    pub room_name: String,
    /// The bounding wall.
    pub wall: ElementId,
    /// Length of the wall's location line.
    pub length: f64,
    /// `length * height`.
    pub area: f64,
    /// Facing derived from the wall's direction.
    pub orientation: Orientation,
}

/// The rows of one room, in boundary traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomReport {
    /// Room number.
    pub number: String,
    /// Room name.
    pub name: String,
    /// One row per resolved boundary entry.
    pub rows: Vec<ReportRow>,
}

/// Per-room wall quantities, rooms in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// One entry per input room.
    pub rooms: Vec<RoomReport>,
    /// Boundary entries that could not be resolved.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Iterates over every row of every room.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rooms.iter().flat_map(|r| r.rows.iter())
    }

    /// Finds a room by number.
    #[must_use]
    pub fn room(&self, number: &str) -> Option<&RoomReport> {
        self.rooms.iter().find(|r| r.number == number)
    }
}

/// Walks each room's boundary and reports the walls it runs along.
///
/// Entries that reference a wall no longer in the network are skipped with
/// a [`Diagnostic::UnresolvedBoundaryReference`], unless lineage following
/// is enabled, in which case they resolve to the replacement wall the
/// boundary starts on. Rows are not deduplicated: a wall bounding two loops
/// of the same room appears twice.
pub struct AggregateRoomWalls<'a> {
    rooms: &'a [Room],
    config: SplitConfig,
}

impl<'a> AggregateRoomWalls<'a> {
    /// Creates a new `AggregateRoomWalls` query.
    #[must_use]
    pub fn new(rooms: &'a [Room], config: SplitConfig) -> Self {
        Self { rooms, config }
    }

    /// Executes the query against the network as it stands.
    #[must_use]
    pub fn execute(&self, network: &WallNetwork) -> Report {
        let mut diagnostics = Vec::new();
        let rooms = self
            .rooms
            .iter()
            .map(|room| {
                let rows = room
                    .entries()
                    .filter_map(|entry| match self.resolve(network, entry) {
                        Some(wall) => Some(row(room, wall)),
                        None => {
                            let d = Diagnostic::UnresolvedBoundaryReference {
                                room: room.number.clone(),
                                wall: entry.wall,
                            };
                            d.log();
                            diagnostics.push(d);
                            None
                        }
                    })
                    .collect();
                RoomReport {
                    number: room.number.clone(),
                    name: room.name.clone(),
                    rows,
                }
            })
            .collect();

        Report { rooms, diagnostics }
    }

    fn resolve<'n>(&self, network: &'n WallNetwork, entry: &BoundaryEntry) -> Option<&'n WallData> {
        if let Ok((_, wall)) = network.wall_by_element(entry.wall) {
            return Some(wall);
        }
        if !self.config.follow_lineage() {
            return None;
        }

        let candidates: Vec<&WallData> = network
            .live_descendants(entry.wall)
            .into_iter()
            .filter_map(|e| network.wall_by_element(e).ok().map(|(_, w)| w))
            .collect();
        let starts_here = candidates.iter().copied().find(|w| {
            let guard = self.config.tolerance() / w.segment.length();
            let t = w.segment.parameter_of(&entry.start);
            t >= -guard && t < 1.0 - guard
        });
        starts_here.or_else(|| candidates.first().copied())
    }
}

fn row(room: &Room, wall: &WallData) -> ReportRow {
    let length = wall.segment.length();
    ReportRow {
        room_number: room.number.clone(),
        room_name: room.name.clone(),
        wall: wall.element,
        length,
        area: length * wall.attributes.height,
        orientation: Orientation::classify(&wall.segment.direction()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::math::Point2;
    use crate::network::{BoundaryLoop, WallAttributes, WallId};
    use approx::assert_abs_diff_eq;

    fn add(
        net: &mut WallNetwork,
        element: u64,
        a: (f64, f64),
        b: (f64, f64),
        height: f64,
    ) -> WallId {
        net.add_wall(WallData::new(
            ElementId(element),
            Segment::new(Point2::new(a.0, a.1), Point2::new(b.0, b.1)).unwrap(),
            WallAttributes::new(ElementId(100), ElementId(200), height),
        ))
        .unwrap()
    }

    fn entry(wall: u64, a: (f64, f64), b: (f64, f64)) -> BoundaryEntry {
        BoundaryEntry::new(ElementId(wall), Point2::new(a.0, a.1), Point2::new(b.0, b.1))
    }

    #[test]
    fn rows_follow_traversal_order() {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (4.0, 0.0), 10.0);
        add(&mut net, 2, (4.0, 0.0), (4.0, 6.0), 10.0);
        add(&mut net, 3, (4.0, 6.0), (-2.0, 6.0), 10.0);
        let rooms = vec![Room::new(
            "1",
            "Lobby",
            vec![BoundaryLoop::new(vec![
                entry(1, (0.0, 0.0), (4.0, 0.0)),
                entry(2, (4.0, 0.0), (4.0, 6.0)),
                entry(3, (4.0, 6.0), (0.0, 0.0)),
            ])],
        )];

        let report = AggregateRoomWalls::new(&rooms, SplitConfig::default()).execute(&net);
        let rows = &report.room("1").unwrap().rows;
        assert_eq!(rows.len(), 3);
        let areas: Vec<f64> = rows.iter().map(|r| r.area).collect();
        assert_abs_diff_eq!(areas[0], 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(areas[1], 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(areas[2], 60.0, epsilon = 1e-9);
        let orientations: Vec<Orientation> = rows.iter().map(|r| r.orientation).collect();
        assert_eq!(
            orientations,
            vec![Orientation::East, Orientation::North, Orientation::West]
        );
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn unresolved_entry_is_skipped_but_room_kept() {
        let net = WallNetwork::new();
        let rooms = vec![Room::new(
            "2",
            "Closet",
            vec![BoundaryLoop::new(vec![entry(9, (0.0, 0.0), (1.0, 0.0))])],
        )];

        let report = AggregateRoomWalls::new(&rooms, SplitConfig::default()).execute(&net);
        assert_eq!(report.rooms.len(), 1);
        assert!(report.rooms[0].rows.is_empty());
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::UnresolvedBoundaryReference {
                room: "2".to_owned(),
                wall: ElementId(9),
            }]
        );
    }

    #[test]
    fn wall_in_two_loops_counts_twice() {
        let mut net = WallNetwork::new();
        add(&mut net, 1, (0.0, 0.0), (3.0, 0.0), 8.0);
        let rooms = vec![Room::new(
            "3",
            "Atrium",
            vec![
                BoundaryLoop::new(vec![entry(1, (0.0, 0.0), (3.0, 0.0))]),
                BoundaryLoop::new(vec![entry(1, (3.0, 0.0), (0.0, 0.0))]),
            ],
        )];

        let report = AggregateRoomWalls::new(&rooms, SplitConfig::default()).execute(&net);
        assert_eq!(report.rows().count(), 2);
    }

    #[test]
    fn lineage_resolves_to_piece_under_boundary_start() {
        let mut net = WallNetwork::new();
        let parent = add(&mut net, 1, (0.0, 0.0), (10.0, 0.0), 10.0);
        add(&mut net, 2, (0.0, 0.0), (6.0, 0.0), 10.0);
        add(&mut net, 3, (6.0, 0.0), (10.0, 0.0), 10.0);
        net.retire(parent, vec![ElementId(2), ElementId(3)]).unwrap();
        let rooms = vec![Room::new(
            "4",
            "Kitchen",
            vec![BoundaryLoop::new(vec![entry(1, (6.0, 0.2), (10.0, 0.2))])],
        )];

        let skipped = AggregateRoomWalls::new(&rooms, SplitConfig::default()).execute(&net);
        assert_eq!(skipped.rows().count(), 0);
        assert_eq!(skipped.diagnostics.len(), 1);

        let config = SplitConfig::default().with_follow_lineage(true);
        let followed = AggregateRoomWalls::new(&rooms, config).execute(&net);
        let rows: Vec<&ReportRow> = followed.rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].wall, ElementId(3));
        assert_abs_diff_eq!(rows[0].length, 4.0, epsilon = 1e-9);
        assert!(followed.diagnostics.is_empty());
    }
}
