use serde::{Deserialize, Serialize};

use crate::quizzes::defaults::{preference_value, question_weight};
use crate::quizzes::domain::{
    AnswerOption, AnswerSelection, AnswerSummary, DimensionVector, Question, VectorSpace,
};

/// The user's aggregated position plus how much answer weight backs each
/// dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceVector {
    pub values: DimensionVector,
    pub weights: DimensionVector,
}

impl PreferenceVector {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key)
    }

    pub fn weight(&self, key: &str) -> f64 {
        self.weights.get(key).unwrap_or(0.0)
    }
}

/// Selected option for `question`, if the answer names one of its options.
fn selected_option<'q>(question: &'q Question, answer: Option<&String>) -> Option<&'q AnswerOption> {
    answer.and_then(|option_id| question.option(option_id))
}

/// Folds answers into a weighted mean per dimension.
///
/// `answers` is parallel to `questions`; missing trailing entries, `None` and
/// unknown option ids all count as unanswered. A dimension only gathers weight
/// from options that specify it.
pub fn aggregate(
    questions: &[Question],
    answers: &[Option<String>],
    space: &VectorSpace,
) -> PreferenceVector {
    let mut sums = space.zeroed();
    let mut weights = space.zeroed();

    for (index, question) in questions.iter().enumerate() {
        let Some(option) = selected_option(question, answers.get(index).and_then(Option::as_ref))
        else {
            continue;
        };

        let weight = question_weight(question.weight);
        for key in space.keys() {
            let Some(value) = option.vector.get(key).filter(|value| value.is_finite()) else {
                continue;
            };
            let sum = sums.get(key).unwrap_or(0.0) + value * weight;
            let total = weights.get(key).unwrap_or(0.0) + weight;
            sums.set(key, sum);
            weights.set(key, total);
        }
    }

    let mut values = space.zeroed();
    for key in space.keys() {
        let value = preference_value(
            sums.get(key).unwrap_or(0.0),
            weights.get(key).unwrap_or(0.0),
            &space.scale,
        );
        values.set(key, value);
    }

    PreferenceVector { values, weights }
}

/// Audit trail of what was picked per question.
pub fn summarize_answers(questions: &[Question], answers: &[Option<String>]) -> Vec<AnswerSummary> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selection =
                match selected_option(question, answers.get(index).and_then(Option::as_ref)) {
                    Some(option) => AnswerSelection::Answered {
                        option_id: option.id.clone(),
                        label: option.label.clone(),
                    },
                    None => AnswerSelection::Unanswered,
                };
            AnswerSummary {
                question_id: question.id.clone(),
                question_title: question.title.clone(),
                selection,
            }
        })
        .collect()
}
