use thiserror::Error;

use crate::network::ElementId;

/// A recoverable problem met while splitting or aggregating.
///
/// Diagnostics never abort a pass; they are collected and handed back to
/// the caller alongside the result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A wall has no usable straight location, or a rebuilt piece was too
    /// short to keep.
    #[error("wall {wall}: degenerate geometry: {reason}")]
    GeometryDegenerate { wall: ElementId, reason: String },

    /// The host refused to create one replacement wall.
    #[error("wall {wall}: replacement segment {segment} rejected: {reason}")]
    SplitFailure {
        wall: ElementId,
        segment: usize,
        reason: String,
    },

    /// A room boundary points at a wall that is no longer live.
    #[error("room {room}: boundary references missing wall {wall}")]
    UnresolvedBoundaryReference { room: String, wall: ElementId },

    /// A room boundary loop does not close on itself.
    #[error("room {room}: boundary loop {loop_index} is not closed")]
    OpenBoundaryLoop { room: String, loop_index: usize },
}

impl Diagnostic {
    /// Emits the diagnostic as a `tracing` warning.
    pub(crate) fn log(&self) {
        tracing::warn!("{self}");
    }
}
