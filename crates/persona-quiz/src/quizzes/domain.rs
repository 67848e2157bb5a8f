use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Closed numeric interval every dimension value of a quiz lives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Scale {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Neutral value reported for dimensions nobody answered.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Largest possible gap between two in-scale values.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// A scoring dimension of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub key: String,
    pub label: String,
}

impl Dimension {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Declared dimensions of a quiz, in the order used for every tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSpace {
    pub dimensions: Vec<Dimension>,
    pub scale: Scale,
}

impl VectorSpace {
    pub fn new(dimensions: Vec<Dimension>, scale: Scale) -> Self {
        Self { dimensions, scale }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(|dimension| dimension.key.as_str())
    }

    /// Zero-filled vector with one entry per declared dimension.
    pub fn zeroed(&self) -> DimensionVector {
        self.filled(0.0)
    }

    pub fn filled(&self, value: f64) -> DimensionVector {
        DimensionVector {
            entries: self
                .dimensions
                .iter()
                .map(|dimension| DimensionEntry {
                    key: dimension.key.clone(),
                    value,
                })
                .collect(),
        }
    }

    /// Builds a full vector from the given pairs; undeclared keys are ignored
    /// and unlisted dimensions stay at zero.
    pub fn vector(&self, values: &[(&str, f64)]) -> DimensionVector {
        let mut vector = self.zeroed();
        for (key, value) in values {
            vector.set(key, *value);
        }
        vector
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionEntry {
    pub key: String,
    pub value: f64,
}

/// Fixed-shape vector over every dimension of a [`VectorSpace`].
///
/// Entries are only ever created by the space, so a vector never gains or
/// loses keys after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionVector {
    entries: Vec<DimensionEntry>,
}

impl DimensionVector {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value)
    }

    /// Updates an existing dimension. Returns `false` for undeclared keys.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                entry.value = value;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> &[DimensionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_option_vector(&self) -> OptionVector {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value))
            .collect()
    }
}

/// Sparse contribution of one answer option. A dimension absent from the map
/// is not specified by the option and receives no weight from it.
pub type OptionVector = BTreeMap<String, f64>;

/// A validated, de-duplicated source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub outcome: String,
    pub reverse: bool,
    pub weight: f64,
    /// Free-text option labels for rule-matched quizzes; empty for Likert.
    pub option_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub vector: OptionVector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: String,
    pub outcome: String,
    pub weight: f64,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

/// Hand-authored point in the quiz's dimension space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub key: String,
    pub name: String,
    pub description: String,
    /// Narrative template; `{name}`, `{description}` and `{traits}` are substituted.
    pub narrative: String,
    pub vector: DimensionVector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub key: String,
    pub name: String,
    pub description: String,
    pub score: u8,
    /// Pre-rounding similarity or magnitude; first tie-break after `score`.
    pub raw: f64,
    /// Position in the candidate catalog; final tie-break.
    pub catalog_index: usize,
    /// 1-based position after ranking; zero until ranked.
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerSelection {
    Answered { option_id: String, label: String },
    Unanswered,
}

/// Which option was picked for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub question_id: String,
    pub question_title: String,
    pub selection: AnswerSelection,
}

impl AnswerSummary {
    pub fn is_answered(&self) -> bool {
        matches!(self.selection, AnswerSelection::Answered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> VectorSpace {
        VectorSpace::new(
            vec![Dimension::new("warmth", "Warmth"), Dimension::new("calm", "Calm")],
            Scale::new(0.0, 10.0),
        )
    }

    #[test]
    fn vector_is_zero_filled_and_ignores_unknown_keys() {
        let vector = space().vector(&[("calm", 7.0), ("noise", 3.0)]);
        assert_eq!(vector.len(), 2);
        assert_eq!(vector.get("warmth"), Some(0.0));
        assert_eq!(vector.get("calm"), Some(7.0));
        assert_eq!(vector.get("noise"), None);
    }

    #[test]
    fn scale_reports_midpoint_and_range() {
        let scale = Scale::new(1.0, 5.0);
        assert_eq!(scale.midpoint(), 3.0);
        assert_eq!(scale.range(), 4.0);
        assert!(scale.contains(5.0));
        assert!(!scale.contains(5.5));
    }
}
