//! # Scorer Module
//!
//! Folds per-question AI scores into one verdict per student. The total is the
//! sum of weighted per-question contributions; the competency label is
//! resolved once, against that total.

use std::collections::HashMap;

use tracing::debug;

use crate::error::MarkerError;
use crate::grading::resolve_label;
use crate::types::{GradeBand, ScoredAnswer, StudentVerdict, Weights};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted contribution of one answer, rounded to 2 decimal places.
///
/// Missing scores count as zero. Fails when the weights do not sum to 100.
///
/// # Example
///
/// ```
/// use marker::{Weights, weighted_contribution};
///
/// let contribution = weighted_contribution(Some(80.0), Some(60.0), &Weights::new(70, 30)).unwrap();
/// assert_eq!(contribution, 74.0);
/// ```
pub fn weighted_contribution(
    first: Option<f64>,
    second: Option<f64>,
    weights: &Weights,
) -> Result<f64, MarkerError> {
    let (f1, f2) = weights.fractions()?;
    Ok(round2(first.unwrap_or(0.0) * f1 + second.unwrap_or(0.0) * f2))
}

#[derive(Default)]
struct Running {
    answered: usize,
    first: f64,
    second: f64,
    weighted: f64,
}

/// Computes a verdict for every student in `students`.
///
/// # Arguments
///
/// * `students` - Ids of every student to report, including those with no answers.
/// * `answers` - Answer records; records for students not in `students` are ignored.
/// * `weights` - Ensemble weighting, validated before any computation.
/// * `bands` - Grade bands; first inclusive match wins, default not-competent.
///
/// # Returns
///
/// One [`StudentVerdict`] per entry of `students`, in the same order. A student
/// without answers scores `0.0` and is labelled against the band containing zero.
///
/// # Errors
///
/// [`MarkerError::WeightMismatch`] when `weights` does not sum to 100.
pub fn aggregate(
    students: &[String],
    answers: &[ScoredAnswer],
    weights: &Weights,
    bands: &[GradeBand],
) -> Result<Vec<StudentVerdict>, MarkerError> {
    let (f1, f2) = weights.fractions()?;

    let mut running: HashMap<&str, Running> = students
        .iter()
        .map(|id| (id.as_str(), Running::default()))
        .collect();

    for answer in answers {
        let Some(entry) = running.get_mut(answer.student_id.as_str()) else {
            continue;
        };
        let first = answer.first_score.unwrap_or(0.0);
        let second = answer.second_score.unwrap_or(0.0);
        entry.answered += 1;
        entry.first += first;
        entry.second += second;
        entry.weighted += round2(first * f1 + second * f2);
    }

    let verdicts = students
        .iter()
        .map(|id| {
            let totals = running.remove(id.as_str()).unwrap_or_default();
            let final_score = round2(totals.weighted);
            StudentVerdict {
                student_id: id.clone(),
                answered: totals.answered,
                total_first_score: totals.first,
                total_second_score: totals.second,
                final_score,
                label: resolve_label(final_score, bands),
            }
        })
        .collect::<Vec<_>>();

    debug!(students = verdicts.len(), answers = answers.len(), "aggregated scores");
    Ok(verdicts)
}
