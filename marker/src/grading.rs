//! Score to competency lookup.

use crate::types::{Competency, GradeBand};

/// Returns the label of the first band containing `score`.
///
/// Bands are inclusive on both ends and are not checked for overlap, so the
/// order of `bands` decides ties. A score outside every band is
/// [`Competency::NotCompetent`].
pub fn resolve_label(score: f64, bands: &[GradeBand]) -> Competency {
    bands
        .iter()
        .find(|band| band.contains(score))
        .map(|band| band.label)
        .unwrap_or(Competency::NotCompetent)
}
