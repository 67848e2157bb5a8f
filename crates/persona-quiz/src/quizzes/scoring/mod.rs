//! Answer-time pipeline: answers to a preference vector, scored and ranked
//! candidates, and a short narrative.

pub mod aggregate;
pub mod ranking;
pub mod strategy;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::definition::QuizDefinition;
use super::domain::{AnswerSummary, Question, ScoredCandidate};

pub use aggregate::{aggregate, summarize_answers, PreferenceVector};
pub use ranking::{dominant_dimensions, narrative, rank, summary_lines, DominantDimension};
pub use strategy::ScoringStrategy;

/// Everything a caller needs to render a finished (or partial) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz: String,
    pub strategy: ScoringStrategy,
    pub preference_vector: PreferenceVector,
    pub ranked_candidates: Vec<ScoredCandidate>,
    pub top_candidate: Option<ScoredCandidate>,
    pub top_candidates: Vec<ScoredCandidate>,
    pub dominant_dimensions: Vec<DominantDimension>,
    pub summary_lines: Vec<String>,
    pub narrative: String,
    pub answers: Vec<AnswerSummary>,
    pub answered: usize,
    pub total: usize,
}

/// Stateless scorer bound to one quiz definition.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    definition: Arc<QuizDefinition>,
}

impl ScoringEngine {
    pub fn new(definition: Arc<QuizDefinition>) -> Self {
        Self { definition }
    }

    pub fn score(&self, questions: &[Question], answers: &[Option<String>]) -> QuizResult {
        let definition = &*self.definition;
        let space = &definition.space;

        let preference = aggregate(questions, answers, space);
        let scored = definition
            .strategy
            .score(&preference, &definition.candidates, space);
        let ranked = rank(scored);

        let top_candidates: Vec<ScoredCandidate> =
            ranked.iter().take(definition.top_n).cloned().collect();
        let top_candidate = ranked.first().cloned();

        let traits = dominant_dimensions(&preference, space, definition.narrative_traits);
        let narrative = top_candidate
            .as_ref()
            .and_then(|top| {
                definition
                    .candidates
                    .iter()
                    .find(|candidate| candidate.key == top.key)
            })
            .map(|candidate| narrative(candidate, &traits))
            .unwrap_or_default();
        let summary_lines = summary_lines(&top_candidates, &traits);

        let answers = summarize_answers(questions, answers);
        let answered = answers.iter().filter(|answer| answer.is_answered()).count();

        debug!(
            quiz = %definition.key,
            strategy = definition.strategy.label(),
            answered,
            total = questions.len(),
            top = top_candidate.as_ref().map(|top| top.key.as_str()).unwrap_or("none"),
            "quiz scored"
        );

        QuizResult {
            quiz: definition.key.clone(),
            strategy: definition.strategy,
            preference_vector: preference,
            ranked_candidates: ranked,
            top_candidate,
            top_candidates,
            dominant_dimensions: traits,
            summary_lines,
            narrative,
            answers,
            answered,
            total: questions.len(),
        }
    }
}
