//! Personality-quiz engine: question banks built from loosely structured
//! tables, and answers scored against candidate profiles in a shared vector
//! space.

pub mod bank;
pub mod catalog;
pub mod collaborators;
pub mod defaults;
pub mod definition;
pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use bank::{build_question_bank, export_csv, QuestionBank};
pub use catalog::{BuiltQuiz, CatalogError, QuizCatalog, QuizSummary};
pub use collaborators::{
    artwork_key, Artwork, ArtworkResolver, InMemoryResultCache, NoCache, ResultCache,
    StaticArtwork,
};
pub use definition::QuizDefinition;
pub use domain::{
    AnswerOption, AnswerSelection, AnswerSummary, CandidateProfile, Dimension, DimensionVector,
    Question, Scale, ScoredCandidate, VectorSpace,
};
pub use router::quiz_router;
pub use scoring::{QuizResult, ScoringEngine, ScoringStrategy};
pub use service::{QuestionSet, QuizService, QuizServiceError, ScoreRequest, ScoreResponse};
