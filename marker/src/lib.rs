//! # Marker Library
//!
//! Turns AI-produced answer scores into one competency verdict per student.
//!
//! ## Key Concepts
//! - **Weights**: the two-model ensemble weighting; the pair must sum to 100.
//! - **GradeBand**: an inclusive `[start, end]` score interval mapped to a [`Competency`].
//! - **Aggregation**: per-question weighted contributions are summed per student,
//!   then the total is labelled once against the bands (see [`scorer::aggregate`]).

pub mod error;
pub mod grading;
pub mod scorer;
pub mod types;

pub use error::MarkerError;
pub use grading::resolve_label;
pub use scorer::{aggregate, weighted_contribution};
pub use types::{Competency, GradeBand, ScoredAnswer, StudentVerdict, Weights};
