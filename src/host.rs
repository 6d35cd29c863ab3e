//! Capability traits the host document implements, and ingestion of host
//! elements into a [`WallNetwork`].

use crate::config::SplitConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{HostError, Result};
use crate::geometry::Segment;
use crate::math::Point2;
use crate::network::{BoundaryLoop, ElementId, Room, WallAttributes, WallData, WallNetwork};

/// Anything the host exposes as a wall.
pub trait WallElement {
    /// Stable host identity.
    fn element_id(&self) -> ElementId;

    /// Endpoints of the straight location line, or `None` if the wall has
    /// no usable straight location (curved, unplaced, ...).
    fn location(&self) -> Option<(Point2, Point2)>;

    /// Type, level and height.
    fn attributes(&self) -> WallAttributes;
}

/// Anything the host exposes as a room.
pub trait RoomElement {
    /// Room number.
    fn number(&self) -> String;

    /// Room name.
    fn name(&self) -> String;

    /// Boundary loops in traversal order, outer loop first.
    fn boundary_loops(&self) -> Vec<BoundaryLoop>;
}

/// Receives the wall mutations decided by a split pass.
///
/// The host applies them inside its own transaction; `commit` closes it.
pub trait WallHost {
    /// Creates a replacement wall.
    ///
    /// # Errors
    ///
    /// Returns the host's rejection; the segment is then skipped.
    fn create_wall(
        &mut self,
        element: ElementId,
        segment: &Segment,
        attributes: &WallAttributes,
    ) -> std::result::Result<(), HostError>;

    /// Deletes a superseded wall.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole batch.
    fn retire_wall(&mut self, element: ElementId) -> std::result::Result<(), HostError>;

    /// Commits the batch.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole batch.
    fn commit(&mut self) -> std::result::Result<(), HostError> {
        Ok(())
    }
}

/// A host that accepts every mutation without side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl WallHost for AcceptAll {
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
}

impl WallElement for WallData {
    fn element_id(&self) -> ElementId {
        self.element
    }

    fn location(&self) -> Option<(Point2, Point2)> {
        Some((*self.segment.start(), *self.segment.end()))
    }

    fn attributes(&self) -> WallAttributes {
        self.attributes
    }
}

impl RoomElement for Room {
    fn number(&self) -> String {
        self.number.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn boundary_loops(&self) -> Vec<BoundaryLoop> {
        self.loops.clone()
    }
}

/// Host elements resolved into the crate's own model.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Walls with a usable straight location.
    pub network: WallNetwork,
    /// Rooms in host order.
    pub rooms: Vec<Room>,
    /// Walls skipped during ingestion.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves host walls and rooms once, up front.
///
/// Walls without a straight location, or whose endpoints coincide, are
/// skipped with a [`Diagnostic::GeometryDegenerate`].
///
/// # Errors
///
/// Returns `TopologyError::DuplicateElement` if two host walls share an
/// element id.
pub fn ingest<W, R>(walls: &[W], rooms: &[R], config: &SplitConfig) -> Result<Ingested>
where
    W: WallElement,
    R: RoomElement,
{
    let mut network = WallNetwork::new();
    let mut diagnostics = Vec::new();

    for wall in walls {
        let element = wall.element_id();
        let segment = wall
            .location()
            .ok_or_else(|| "no straight location line".to_owned())
            .and_then(|(start, end)| {
                Segment::with_tolerance(start, end, config.tolerance()).map_err(|e| e.to_string())
            });
        match segment {
            Ok(segment) => {
                network.add_wall(WallData::new(element, segment, wall.attributes()))?;
            }
            Err(reason) => {
                let d = Diagnostic::GeometryDegenerate { wall: element, reason };
                d.log();
                diagnostics.push(d);
            }
        }
    }

    let rooms: Vec<Room> = rooms
        .iter()
        .map(|r| Room::new(r.number(), r.name(), r.boundary_loops()))
        .collect();

    tracing::debug!(
        "Ingested {} walls ({} skipped) and {} rooms",
        network.len(),
        diagnostics.len(),
        rooms.len()
    );

    Ok(Ingested {
        network,
        rooms,
        diagnostics,
    })
}
