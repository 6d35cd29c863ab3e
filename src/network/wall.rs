use std::fmt;

use crate::geometry::Segment;

slotmap::new_key_type! {
    /// Unique identifier for a live wall in the wall network.
    pub struct WallId;
}

/// Host-visible element identity.
///
/// Walls keep the id they were ingested with; replacement walls receive
/// fresh ids allocated by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host attributes copied verbatim onto every replacement wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallAttributes {
    /// Wall type element.
    pub type_id: ElementId,
    /// Level the wall is hosted on.
    pub level_id: ElementId,
    /// Unconnected height, in plan length units.
    pub height: f64,
}

impl WallAttributes {
    /// Creates a new attribute set.
    #[must_use]
    pub fn new(type_id: ElementId, level_id: ElementId, height: f64) -> Self {
        Self {
            type_id,
            level_id,
            height,
        }
    }
}

/// Data associated with a wall.
#[derive(Debug, Clone)]
pub struct WallData {
    /// Host element identity.
    pub element: ElementId,
    /// The wall's location line.
    pub segment: Segment,
    /// Type, level and height.
    pub attributes: WallAttributes,
}

impl WallData {
    /// Creates new wall data.
    #[must_use]
    pub fn new(element: ElementId, segment: Segment, attributes: WallAttributes) -> Self {
        Self {
            element,
            segment,
            attributes,
        }
    }
}
