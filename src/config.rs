use crate::error::{OperationError, Result};
use crate::math::{PARALLEL_TOLERANCE, TOLERANCE};

/// Tolerances and switches shared by every stage of a segmentation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    tolerance: f64,
    min_length: f64,
    parallel_tolerance: f64,
    follow_lineage: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            min_length: TOLERANCE,
            parallel_tolerance: PARALLEL_TOLERANCE,
            follow_lineage: false,
        }
    }
}

impl SplitConfig {
    /// Creates a configuration with the given point tolerance and minimum
    /// segment length.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if either value is not a
    /// positive finite number.
    pub fn new(tolerance: f64, min_length: f64) -> Result<Self> {
        check_positive("tolerance", tolerance)?;
        check_positive("min_length", min_length)?;
        Ok(Self {
            tolerance,
            min_length,
            ..Self::default()
        })
    }

    /// Sets the parallel-line threshold.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the value is not a positive
    /// finite number.
    pub fn with_parallel_tolerance(mut self, parallel_tolerance: f64) -> Result<Self> {
        check_positive("parallel_tolerance", parallel_tolerance)?;
        self.parallel_tolerance = parallel_tolerance;
        Ok(self)
    }

    /// Resolve boundary references to retired walls through their
    /// replacement walls instead of skipping them.
    #[must_use]
    pub fn with_follow_lineage(mut self, follow_lineage: bool) -> Self {
        self.follow_lineage = follow_lineage;
        self
    }

    /// Distance below which two points are the same point.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Shortest sub-segment the rebuilder will emit.
    #[must_use]
    pub fn min_length(&self) -> f64 {
        self.min_length
    }

    /// Sine of the smallest angle still treated as a crossing.
    #[must_use]
    pub fn parallel_tolerance(&self) -> f64 {
        self.parallel_tolerance
    }

    /// Whether the aggregator follows supersession lineage.
    #[must_use]
    pub fn follow_lineage(&self) -> bool {
        self.follow_lineage
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OperationError::InvalidInput(format!(
            "{name} must be positive and finite, got {value}"
        ))
        .into())
    }
}
