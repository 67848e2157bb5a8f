//! Build-time pipeline: delimited rows to a frozen, balanced question bank.

pub mod normalizer;
pub mod options;
pub mod parser;
pub mod quota;
pub mod rules;

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::definition::QuizDefinition;
use super::domain::Question;

pub use normalizer::{normalize_rows, ColumnLayout, OutcomeSet};
pub use options::{build_options, build_question, LikertScale, OptionMode};
pub use parser::{parse_line, parse_rows, MalformedRow};
pub use quota::{interleave, quota_shares, select_balanced};
pub use rules::{
    Contains, Exact, LabelPredicate, OptionRule, Pattern, RuleSet, RuleSetError, VectorPreset,
};

/// Finalized questions for one quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub quiz: String,
    /// Fixed count the quiz asked for, if it trims its bank.
    pub requested: Option<usize>,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions missing from the requested count after backfill.
    pub fn shortfall(&self) -> usize {
        self.requested
            .map(|requested| requested.saturating_sub(self.questions.len()))
            .unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// Parses, normalizes, balances and expands `raw_input` into a bank.
///
/// Never fails: bad rows are dropped and a short source yields a short bank,
/// reported through [`QuestionBank::shortfall`].
pub fn build_question_bank(raw_input: &str, definition: &QuizDefinition) -> QuestionBank {
    let rows = parse_rows(raw_input);
    let items = normalize_rows(&rows, &definition.layout, &definition.outcomes);

    let selected = match definition.bank_size {
        Some(target) => select_balanced(
            &items,
            |item| item.outcome.as_str(),
            definition.outcomes.keys(),
            target,
        ),
        None => items.clone(),
    };

    let questions: Vec<Question> = selected
        .iter()
        .map(|item| build_question(item, &definition.mode))
        .collect();

    let bank = QuestionBank {
        quiz: definition.key.clone(),
        requested: definition.bank_size,
        questions,
    };

    info!(
        quiz = %bank.quiz,
        rows = rows.len(),
        accepted = items.len(),
        questions = bank.len(),
        "question bank built"
    );
    if !bank.is_complete() {
        warn!(
            quiz = %bank.quiz,
            requested = ?bank.requested,
            shortfall = bank.shortfall(),
            "question bank shorter than requested"
        );
    }

    bank
}

/// Writes one CSV row per answer option of the bank.
pub fn export_csv<W: Write>(bank: &QuestionBank, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "question_id",
        "question",
        "outcome",
        "weight",
        "option_id",
        "option_label",
        "contribution",
    ])?;

    for question in &bank.questions {
        for option in &question.options {
            let contribution = option
                .vector
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(";");
            let weight = question.weight.to_string();
            csv_writer.write_record([
                question.id.as_str(),
                question.title.as_str(),
                question.outcome.as_str(),
                weight.as_str(),
                option.id.as_str(),
                option.label.as_str(),
                contribution.as_str(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}
