use thiserror::Error;

/// Top-level error type for the wall segmentation engine.
#[derive(Debug, Error)]
pub enum WallSplitError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the wall network store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("duplicate element id: {0}")]
    DuplicateElement(u64),

    #[error("no element id left above {0}")]
    ElementIdsExhausted(u64),
}

/// Errors related to segmentation operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("host rejected the split batch: {0}")]
    HostFailure(#[from] HostError),
}

/// Errors related to writing the room-wall report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// A rejection reported by the host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    /// Creates a host error from any message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Convenience type alias for results using [`WallSplitError`].
pub type Result<T> = std::result::Result<T, WallSplitError>;
