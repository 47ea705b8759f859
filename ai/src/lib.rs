//! Client for the external AI service.
//!
//! The service exposes two operations: `extract`, which turns raw document
//! text into an assessment with seeded questions and answer keys, and
//! `evaluate`, which scores a batch of student answers against those keys with
//! a named model. Both calls go through the same [`retry::with_retry`] loop,
//! each with its own [`RetryPolicy`].

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::AiClient;
pub use error::AiError;
pub use retry::RetryPolicy;
pub use types::{EvaluationItem, EvaluationResult, ExtractedAssessment, ExtractedQuestion};
