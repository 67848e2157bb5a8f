use super::bank::{ColumnLayout, OptionMode, OutcomeSet};
use super::domain::{CandidateProfile, VectorSpace};
use super::scoring::ScoringStrategy;

/// Immutable configuration of one quiz, handed to the bank builder and the
/// scoring engine.
#[derive(Debug, Clone)]
pub struct QuizDefinition {
    pub key: String,
    pub title: String,
    pub description: String,
    pub space: VectorSpace,
    /// Allowed outcome keys in declared group order.
    pub outcomes: OutcomeSet,
    pub layout: ColumnLayout,
    pub mode: OptionMode,
    /// Fixed bank size; `None` keeps every accepted item in source order.
    pub bank_size: Option<usize>,
    pub candidates: Vec<CandidateProfile>,
    pub strategy: ScoringStrategy,
    pub top_n: usize,
    pub narrative_traits: usize,
    /// Embedded source table.
    pub source: &'static str,
}
