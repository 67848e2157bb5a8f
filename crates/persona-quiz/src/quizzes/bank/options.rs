use crate::quizzes::domain::{AnswerOption, NormalizedItem, OptionVector, Question};

use super::rules::RuleSet;

/// Agreement labels in display order.
pub const LIKERT_LABELS: [(&str, &str); 5] = [
    ("strongly_agree", "Strongly agree"),
    ("agree", "Agree"),
    ("neutral", "Neutral"),
    ("disagree", "Disagree"),
    ("strongly_disagree", "Strongly disagree"),
];

/// Scalars assigned to the five agreement labels, strongest agreement first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikertScale {
    values: [f64; 5],
}

impl LikertScale {
    pub const fn new(values: [f64; 5]) -> Self {
        Self { values }
    }

    /// Scalars in label order. Reverse-scored items get the sequence inverted,
    /// so agreeing lowers the target dimension.
    pub fn scalars(&self, reverse: bool) -> [f64; 5] {
        let mut values = self.values;
        if reverse {
            values.reverse();
        }
        values
    }
}

impl Default for LikertScale {
    fn default() -> Self {
        Self::new([5.0, 4.0, 3.0, 2.0, 1.0])
    }
}

/// How a quiz turns an item into answer options.
#[derive(Debug, Clone)]
pub enum OptionMode {
    Likert(LikertScale),
    RuleMatched(RuleSet),
}

pub fn build_options(item: &NormalizedItem, mode: &OptionMode) -> Vec<AnswerOption> {
    match mode {
        OptionMode::Likert(scale) => likert_options(item, scale),
        OptionMode::RuleMatched(rules) => rule_matched_options(item, rules),
    }
}

pub fn build_question(item: &NormalizedItem, mode: &OptionMode) -> Question {
    Question {
        id: item.id.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        outcome: item.outcome.clone(),
        weight: item.weight,
        options: build_options(item, mode),
    }
}

fn likert_options(item: &NormalizedItem, scale: &LikertScale) -> Vec<AnswerOption> {
    LIKERT_LABELS
        .iter()
        .zip(scale.scalars(item.reverse))
        .map(|((slug, label), value)| {
            let mut vector = OptionVector::new();
            vector.insert(item.outcome.clone(), value);
            AnswerOption {
                id: format!("{}:{}", item.id, slug),
                label: (*label).to_string(),
                score: Some(value),
                vector,
            }
        })
        .collect()
}

fn rule_matched_options(item: &NormalizedItem, rules: &RuleSet) -> Vec<AnswerOption> {
    item.option_labels
        .iter()
        .enumerate()
        .filter(|(_, label)| !label.is_empty())
        .map(|(ordinal, label)| {
            let (_, vector) = rules.resolve(label, ordinal);
            AnswerOption {
                id: format!("{}:{}", item.id, ordinal + 1),
                label: label.clone(),
                score: None,
                vector: vector.to_option_vector(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quizzes::bank::rules::{Contains, OptionRule, VectorPreset};
    use crate::quizzes::domain::{Dimension, Scale, VectorSpace};

    fn item(reverse: bool, labels: &[&str]) -> NormalizedItem {
        NormalizedItem {
            id: "q7".into(),
            title: "I enjoy planning ahead".into(),
            description: String::new(),
            outcome: "type1".into(),
            reverse,
            weight: 1.0,
            option_labels: labels.iter().map(|label| label.to_string()).collect(),
        }
    }

    #[test]
    fn likert_produces_five_descending_options() {
        let options = build_options(&item(false, &[]), &OptionMode::Likert(LikertScale::default()));
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].id, "q7:strongly_agree");
        assert_eq!(options[0].label, "Strongly agree");
        assert_eq!(options[0].vector.get("type1"), Some(&5.0));
        assert_eq!(options[4].score, Some(1.0));
        assert_eq!(options[0].vector.len(), 1);
    }

    #[test]
    fn reverse_item_gives_strong_agreement_the_minimum() {
        let options = build_options(&item(true, &[]), &OptionMode::Likert(LikertScale::default()));
        assert_eq!(options[0].label, "Strongly agree");
        assert_eq!(options[0].score, Some(1.0));
        assert_eq!(options[4].score, Some(5.0));
    }

    #[test]
    fn rule_matched_options_carry_complete_vectors() {
        let space = VectorSpace::new(
            vec![Dimension::new("energy", "Energy"), Dimension::new("calm", "Calm")],
            Scale::new(0.0, 100.0),
        );
        let rules = RuleSet::new(
            vec![
                VectorPreset {
                    key: "lively".into(),
                    vector: space.vector(&[("energy", 80.0), ("calm", 30.0)]),
                },
                VectorPreset {
                    key: "mellow".into(),
                    vector: space.vector(&[("energy", 10.0), ("calm", 90.0)]),
                },
            ],
            vec![OptionRule::new(Contains::any(["nap"]), "mellow")],
            Vec::new(),
        )
        .expect("valid rules");

        let options = build_options(
            &item(false, &["Chase the laser", "Take a nap", "", "Watch birds"]),
            &OptionMode::RuleMatched(rules),
        );

        assert_eq!(options.len(), 3);
        assert_eq!(options[0].id, "q7:1");
        assert_eq!(options[0].vector.get("energy"), Some(&80.0));
        assert_eq!(options[1].vector.get("calm"), Some(&90.0));
        assert_eq!(options[2].id, "q7:4");
        assert_eq!(options[2].vector.get("energy"), Some(&10.0));
        assert!(options.iter().all(|option| option.vector.len() == 2));
    }
}
