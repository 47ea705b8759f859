//! Marker Error Types
//!
//! [`MarkerError`] covers the configuration problems that stop an aggregation
//! from running. Score data itself never fails: missing values count as zero.

use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerError {
    /// Ensemble weights do not form a 100% partition.
    #[error("model weights must sum to 100 (got {first} + {second})")]
    WeightMismatch { first: i32, second: i32 },
}
