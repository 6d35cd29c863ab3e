use crate::math::{points_coincide, Point2};

use super::wall::ElementId;

/// One boundary curve of a room, attributed to the wall that bounds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryEntry {
    /// The bounding wall.
    pub wall: ElementId,
    /// Where the boundary curve starts; the wall is always cut here.
    pub start: Point2,
    /// Where the boundary curve ends.
    pub end: Point2,
}

impl BoundaryEntry {
    /// Creates a new boundary entry.
    #[must_use]
    pub fn new(wall: ElementId, start: Point2, end: Point2) -> Self {
        Self { wall, start, end }
    }
}

/// An ordered chain of boundary entries outlining a room or a hole in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryLoop {
    /// Entries in traversal order.
    pub entries: Vec<BoundaryEntry>,
}

impl BoundaryLoop {
    /// Creates a loop from its entries.
    #[must_use]
    pub fn new(entries: Vec<BoundaryEntry>) -> Self {
        Self { entries }
    }

    /// Returns `true` if every entry ends where the next one starts and the
    /// last entry ends where the first starts. An empty loop is closed.
    #[must_use]
    pub fn is_closed(&self, tolerance: f64) -> bool {
        let n = self.entries.len();
        (0..n).all(|i| {
            let next = &self.entries[(i + 1) % n];
            points_coincide(&self.entries[i].end, &next.start, tolerance)
        })
    }
}

/// A room with its number, name and boundary loops.
///
/// The first loop is conventionally the outer boundary; further loops
/// outline holes such as columns or islands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Room {
    /// Room number as shown in the host.
    pub number: String,
    /// Room name as shown in the host.
    pub name: String,
    /// Boundary loops.
    pub loops: Vec<BoundaryLoop>,
}

impl Room {
    /// Creates a new room.
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        loops: Vec<BoundaryLoop>,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            loops,
        }
    }

    /// Iterates over every boundary entry of every loop, in traversal order.
    pub fn entries(&self) -> impl Iterator<Item = &BoundaryEntry> {
        self.loops.iter().flat_map(|l| l.entries.iter())
    }
}
