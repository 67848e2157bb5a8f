use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::{BuiltQuiz, QuizCatalog, QuizSummary};
use super::collaborators::{artwork_key, Artwork, ArtworkResolver, ResultCache};
use super::domain::Question;
use super::scoring::{summarize_answers, QuizResult};

/// Answers for one quiz session, parallel to the bank's question order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: Vec<Option<String>>,
    /// Opaque session key; a known session resubmitting the same answers is
    /// served from the cache.
    #[serde(default)]
    pub session: Option<String>,
}

/// Questions of a quiz as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSet {
    pub quiz: String,
    pub title: String,
    pub requested: Option<usize>,
    pub shortfall: usize,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResponse {
    pub result: QuizResult,
    pub artwork: Option<Artwork>,
    pub cached: bool,
}

/// Service composing the catalog with the result cache and artwork lookup.
pub struct QuizService<C, A> {
    catalog: Arc<QuizCatalog>,
    cache: Arc<C>,
    artwork: Arc<A>,
}

impl<C, A> QuizService<C, A>
where
    C: ResultCache + 'static,
    A: ArtworkResolver + 'static,
{
    pub fn new(catalog: Arc<QuizCatalog>, cache: Arc<C>, artwork: Arc<A>) -> Self {
        Self {
            catalog,
            cache,
            artwork,
        }
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    pub fn list(&self) -> Vec<QuizSummary> {
        self.catalog.summaries()
    }

    pub fn questions(&self, quiz: &str) -> Result<QuestionSet, QuizServiceError> {
        let built = self.lookup(quiz)?;
        let bank = built.bank();
        Ok(QuestionSet {
            quiz: built.key().to_string(),
            title: built.definition().title.clone(),
            requested: bank.requested,
            shortfall: bank.shortfall(),
            questions: bank.questions.clone(),
        })
    }

    /// Scores a session. With a session key, a cached result is reused only
    /// while it was computed from the same selections; anything else is
    /// rescored and replaces the cached entry.
    pub fn score(
        &self,
        quiz: &str,
        request: ScoreRequest,
    ) -> Result<ScoreResponse, QuizServiceError> {
        let built = self.lookup(quiz)?;
        let cache_key = request
            .session
            .as_deref()
            .map(str::trim)
            .filter(|session| !session.is_empty())
            .map(|session| format!("{}:{}", built.key(), session));

        let questions = &built.bank().questions;
        if let Some(result) = cache_key.as_deref().and_then(|key| self.cache.load(key)) {
            if result.answers == summarize_answers(questions, &request.answers) {
                info!(quiz = built.key(), "served cached quiz result");
                return Ok(self.respond(built, result, true));
            }
            debug!(quiz = built.key(), "session answers changed; rescoring");
        }

        let result = built.engine().score(questions, &request.answers);

        if let Some(key) = cache_key.as_deref() {
            self.cache.save(key, &result);
        }

        info!(
            quiz = built.key(),
            answered = result.answered,
            total = result.total,
            "quiz result computed"
        );
        Ok(self.respond(built, result, false))
    }

    fn lookup(&self, quiz: &str) -> Result<&BuiltQuiz, QuizServiceError> {
        self.catalog
            .get(quiz)
            .ok_or_else(|| QuizServiceError::UnknownQuiz(quiz.to_string()))
    }

    fn respond(&self, built: &BuiltQuiz, result: QuizResult, cached: bool) -> ScoreResponse {
        let artwork = result
            .top_candidate
            .as_ref()
            .map(|top| self.artwork.resolve(&artwork_key(built.key(), &top.key)));
        ScoreResponse {
            result,
            artwork,
            cached,
        }
    }
}

/// Error raised by the quiz service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizServiceError {
    #[error("unknown quiz '{0}'")]
    UnknownQuiz(String),
}
