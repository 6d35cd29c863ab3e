use crate::diagnostics::Diagnostic;
use crate::error::{OperationError, Result};
use crate::geometry::Segment;
use crate::host::WallHost;
use crate::network::{ElementId, WallData, WallId, WallNetwork};

/// Replaces a wall with walls along the given sub-segments.
///
/// Each replacement gets a fresh element id and the original's type, level
/// and height. A replacement the host rejects is skipped with a
/// [`Diagnostic::SplitFailure`] and the remaining ones are still created;
/// the original is retired either way.
pub struct ApplySplit<'a> {
    wall: WallId,
    segments: &'a [Segment],
}

impl<'a> ApplySplit<'a> {
    /// Creates a new `ApplySplit` operation.
    #[must_use]
    pub fn new(wall: WallId, segments: &'a [Segment]) -> Self {
        Self { wall, segments }
    }

    /// Executes the split, returning the element ids of the created walls
    /// in chain order.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not live, if no fresh element id is
    /// left, or if the host fails to retire the original.
    pub fn execute<H: WallHost + ?Sized>(
        &self,
        network: &mut WallNetwork,
        host: &mut H,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<ElementId>> {
        let original = network.wall(self.wall)?;
        let parent = original.element;
        let attributes = original.attributes;

        let mut children = Vec::with_capacity(self.segments.len());
        for (index, segment) in self.segments.iter().enumerate() {
            let element = network.allocate_element()?;
            match host.create_wall(element, segment, &attributes) {
                Ok(()) => {
                    network.add_wall(WallData::new(element, *segment, attributes))?;
                    children.push(element);
                }
                Err(e) => {
                    let d = Diagnostic::SplitFailure {
                        wall: parent,
                        segment: index,
                        reason: e.to_string(),
                    };
                    d.log();
                    diagnostics.push(d);
                }
            }
        }

        host.retire_wall(parent).map_err(OperationError::from)?;
        network.retire(self.wall, children.clone())?;

        tracing::debug!(
            "Wall {} replaced by {} of {} segments",
            parent,
            children.len(),
            self.segments.len()
        );
        Ok(children)
    }
}
