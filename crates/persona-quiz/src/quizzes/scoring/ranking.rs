use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::quizzes::domain::{CandidateProfile, ScoredCandidate, VectorSpace};

use super::aggregate::PreferenceVector;

/// Orders by score, then unrounded raw value, then catalog position, and
/// assigns 1-based ranks.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(|left, right| {
        right
            .score
            .cmp(&left.score)
            .then_with(|| right.raw.total_cmp(&left.raw))
            .then_with(|| left.catalog_index.cmp(&right.catalog_index))
    });
    for (position, candidate) in scored.iter_mut().enumerate() {
        candidate.rank = position + 1;
    }
    scored
}

/// A dimension that stands out in the preference vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantDimension {
    pub key: String,
    pub label: String,
    pub value: f64,
}

/// Highest `count` dimensions by value; ties keep declared order.
pub fn dominant_dimensions(
    preference: &PreferenceVector,
    space: &VectorSpace,
    count: usize,
) -> Vec<DominantDimension> {
    let mut dimensions: Vec<(usize, DominantDimension)> = space
        .dimensions
        .iter()
        .enumerate()
        .map(|(order, dimension)| {
            (
                order,
                DominantDimension {
                    key: dimension.key.clone(),
                    label: dimension.label.clone(),
                    value: preference
                        .value(&dimension.key)
                        .unwrap_or_else(|| space.scale.midpoint()),
                },
            )
        })
        .collect();

    dimensions.sort_by(|(left_order, left), (right_order, right)| {
        right
            .value
            .partial_cmp(&left.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| left_order.cmp(right_order))
    });

    dimensions
        .into_iter()
        .take(count)
        .map(|(_, dimension)| dimension)
        .collect()
}

/// `a`, `a and b`, `a, b and c`.
pub fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Fills the candidate's narrative template.
pub fn narrative(candidate: &CandidateProfile, traits: &[DominantDimension]) -> String {
    let labels: Vec<&str> = traits.iter().map(|dimension| dimension.label.as_str()).collect();
    candidate
        .narrative
        .replace("{name}", &candidate.name)
        .replace("{description}", &candidate.description)
        .replace("{traits}", &join_labels(&labels).to_lowercase())
}

/// One line per leading candidate plus the strongest dimensions.
pub fn summary_lines(top: &[ScoredCandidate], traits: &[DominantDimension]) -> Vec<String> {
    let mut lines: Vec<String> = top
        .iter()
        .map(|candidate| format!("{}. {} ({}%)", candidate.rank, candidate.name, candidate.score))
        .collect();

    if !traits.is_empty() {
        let strongest = traits
            .iter()
            .map(|dimension| format!("{} {:.1}", dimension.label, dimension.value))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Strongest dimensions: {strongest}"));
    }

    lines
}
