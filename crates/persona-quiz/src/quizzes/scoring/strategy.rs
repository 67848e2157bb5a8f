use serde::{Deserialize, Serialize};

use crate::quizzes::defaults::{dimension_weight, vector_entry, DEFAULT_WEIGHT_FLOOR};
use crate::quizzes::domain::{CandidateProfile, ScoredCandidate, VectorSpace};

use super::aggregate::PreferenceVector;

/// How candidates are compared against a preference vector. Quizzes pick one;
/// the two are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Weighted, normalized Euclidean distance; identical vectors score 100.
    WeightedDistance { weight_floor: f64 },
    /// Candidate-weighted dimension sum, normalized by the best candidate.
    RawMagnitude,
}

impl Default for ScoringStrategy {
    fn default() -> Self {
        Self::WeightedDistance {
            weight_floor: DEFAULT_WEIGHT_FLOOR,
        }
    }
}

impl ScoringStrategy {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WeightedDistance { .. } => "weighted distance",
            Self::RawMagnitude => "raw magnitude",
        }
    }

    /// Scores every candidate, in catalog order.
    pub fn score(
        &self,
        preference: &PreferenceVector,
        candidates: &[CandidateProfile],
        space: &VectorSpace,
    ) -> Vec<ScoredCandidate> {
        let raw: Vec<f64> = match self {
            Self::WeightedDistance { weight_floor } => candidates
                .iter()
                .map(|candidate| similarity(preference, candidate, space, *weight_floor))
                .collect(),
            Self::RawMagnitude => candidates
                .iter()
                .map(|candidate| magnitude(preference, candidate, space))
                .collect(),
        };

        let scale = match self {
            Self::WeightedDistance { .. } => 1.0,
            Self::RawMagnitude => {
                let top = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                if top > 0.0 {
                    1.0 / top
                } else {
                    0.0
                }
            }
        };

        candidates
            .iter()
            .zip(raw)
            .enumerate()
            .map(|(index, (candidate, raw))| ScoredCandidate {
                key: candidate.key.clone(),
                name: candidate.name.clone(),
                description: candidate.description.clone(),
                score: to_percent(raw * scale),
                raw,
                catalog_index: index,
                rank: 0,
            })
            .collect()
    }
}

/// `1 - sqrt(distance / max_distance)`, in `[0, 1]`.
fn similarity(
    preference: &PreferenceVector,
    candidate: &CandidateProfile,
    space: &VectorSpace,
    weight_floor: f64,
) -> f64 {
    let max_gap = space.scale.range();
    let mut distance = 0.0;
    let mut max_distance = 0.0;

    for key in space.keys() {
        let weight = dimension_weight(preference.weight(key), weight_floor);
        let wanted = preference
            .value(key)
            .unwrap_or_else(|| space.scale.midpoint());
        let gap = vector_entry(&candidate.vector, key, &space.scale) - wanted;
        distance += weight * gap * gap;
        max_distance += weight * max_gap * max_gap;
    }

    if max_distance <= 0.0 {
        return 0.0;
    }

    1.0 - (distance / max_distance).sqrt()
}

/// Sum of the preference values, each weighted by the candidate's emphasis.
fn magnitude(preference: &PreferenceVector, candidate: &CandidateProfile, space: &VectorSpace) -> f64 {
    space
        .keys()
        .map(|key| {
            let emphasis = candidate.vector.get(key).filter(|value| value.is_finite());
            let wanted = preference.value(key).unwrap_or(0.0);
            emphasis.unwrap_or(0.0) * wanted
        })
        .sum()
}

/// Rounds a `[0, 1]` ratio to a whole percentage, clamped.
fn to_percent(ratio: f64) -> u8 {
    if !ratio.is_finite() {
        return 0;
    }
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
