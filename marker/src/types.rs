use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MarkerError;

/// Competency label attached to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Competency {
    #[serde(rename = "competent")]
    Competent,
    #[default]
    #[serde(rename = "not-competent")]
    NotCompetent,
}

impl Competency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Competency::Competent => "competent",
            Competency::NotCompetent => "not-competent",
        }
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive score interval and the label it grants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub start: f64,
    pub end: f64,
    pub label: Competency,
}

impl GradeBand {
    pub fn new(start: f64, end: f64, label: Competency) -> Self {
        Self { start, end, label }
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.start && score <= self.end
    }
}

/// Integer percentages for the first and second model of an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub first: i32,
    pub second: i32,
}

impl Weights {
    pub fn new(first: i32, second: i32) -> Self {
        Self { first, second }
    }

    /// Checks that both weights are non-negative and the pair sums to 100.
    pub fn validate(&self) -> Result<(), MarkerError> {
        let in_range = self.first >= 0 && self.second >= 0;
        if !in_range || self.first.checked_add(self.second) != Some(100) {
            return Err(MarkerError::WeightMismatch {
                first: self.first,
                second: self.second,
            });
        }
        Ok(())
    }

    /// Validated weights as fractions of one.
    pub fn fractions(&self) -> Result<(f64, f64), MarkerError> {
        self.validate()?;
        Ok((self.first as f64 / 100.0, self.second as f64 / 100.0))
    }
}

/// One stored answer's AI scores, keyed by the student who wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub student_id: String,
    pub first_score: Option<f64>,
    pub second_score: Option<f64>,
}

/// Aggregated outcome for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentVerdict {
    pub student_id: String,
    /// Number of answer records folded into the totals.
    pub answered: usize,
    /// Unweighted sum of first-model scores, kept for reporting.
    pub total_first_score: f64,
    /// Unweighted sum of second-model scores, kept for reporting.
    pub total_second_score: f64,
    /// Sum of rounded per-question contributions, rounded to 2 decimals.
    pub final_score: f64,
    /// Serialized as `status`, the name report consumers read.
    #[serde(rename = "status")]
    pub label: Competency,
}
