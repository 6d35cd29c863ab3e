pub mod room;
pub mod wall;

pub use room::{BoundaryEntry, BoundaryLoop, Room};
pub use wall::{ElementId, WallAttributes, WallData, WallId};

use std::collections::HashMap;

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all live walls.
///
/// Walls are addressed internally by [`WallId`] and externally by their
/// host [`ElementId`]. Retired walls leave the arena and the element index;
/// only their supersession lineage is kept.
#[derive(Debug, Clone, Default)]
pub struct WallNetwork {
    walls: SlotMap<WallId, WallData>,
    by_element: HashMap<ElementId, WallId>,
    lineage: HashMap<ElementId, Vec<ElementId>>,
    next_element: u64,
}

impl WallNetwork {
    /// Creates a new, empty wall network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a wall and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::DuplicateElement` if the element id is already
    /// live or was retired earlier.
    pub fn add_wall(&mut self, data: WallData) -> Result<WallId, TopologyError> {
        let element = data.element;
        if self.is_taken(element) {
            return Err(TopologyError::DuplicateElement(element.0));
        }
        self.next_element = self.next_element.max(element.0.saturating_add(1));
        let id = self.walls.insert(data);
        self.by_element.insert(element, id);
        Ok(id)
    }

    /// Returns a fresh element id, greater than every id seen so far.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::ElementIdsExhausted` if an ingested id sits
    /// at the top of the id range.
    pub fn allocate_element(&mut self) -> Result<ElementId, TopologyError> {
        let mut candidate = self.next_element;
        while self.is_taken(ElementId(candidate)) {
            candidate = candidate
                .checked_add(1)
                .ok_or(TopologyError::ElementIdsExhausted(candidate))?;
        }
        // Saturates at the top; a taken `u64::MAX` fails the next call.
        self.next_element = candidate.saturating_add(1);
        Ok(ElementId(candidate))
    }

    fn is_taken(&self, element: ElementId) -> bool {
        self.by_element.contains_key(&element) || self.lineage.contains_key(&element)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not live in the network.
    pub fn wall(&self, id: WallId) -> Result<&WallData, TopologyError> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))
    }

    /// Looks up a live wall by its host element id.
    ///
    /// # Errors
    ///
    /// Returns an error if no live wall carries that element id, including
    /// when the wall has been retired.
    pub fn wall_by_element(
        &self,
        element: ElementId,
    ) -> Result<(WallId, &WallData), TopologyError> {
        self.by_element
            .get(&element)
            .and_then(|&id| self.walls.get(id).map(|data| (id, data)))
            .ok_or_else(|| TopologyError::EntityNotFound(format!("wall {element}")))
    }

    /// Retires a wall, recording the walls that replace it.
    ///
    /// The wall is removed from the arena and the element index; later
    /// lookups by either id fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not live in the network.
    pub fn retire(
        &mut self,
        id: WallId,
        successors: Vec<ElementId>,
    ) -> Result<WallData, TopologyError> {
        let data = self
            .walls
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("wall".into()))?;
        self.by_element.remove(&data.element);
        self.lineage.insert(data.element, successors);
        Ok(data)
    }

    /// Returns `true` if the element id belonged to a wall that was retired.
    #[must_use]
    pub fn is_retired(&self, element: ElementId) -> bool {
        self.lineage.contains_key(&element)
    }

    /// Returns the walls that directly replaced a retired wall.
    #[must_use]
    pub fn successors(&self, element: ElementId) -> Option<&[ElementId]> {
        self.lineage.get(&element).map(Vec::as_slice)
    }

    /// Returns the live walls that descend from `element`, in chain order.
    ///
    /// A live element is its own only descendant. Unknown ids have none.
    #[must_use]
    pub fn live_descendants(&self, element: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![element];
        while let Some(current) = stack.pop() {
            if self.by_element.contains_key(&current) {
                out.push(current);
            } else if let Some(children) = self.lineage.get(&current) {
                stack.extend(children.iter().rev());
            }
        }
        out
    }

    /// Iterates over all live walls.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Live wall ids ordered by element id.
    #[must_use]
    pub fn wall_ids(&self) -> Vec<WallId> {
        let mut ids: Vec<(ElementId, WallId)> =
            self.walls.iter().map(|(id, w)| (w.element, id)).collect();
        ids.sort_unstable_by_key(|&(element, _)| element);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Number of live walls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Returns `true` if the network has no live walls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}
