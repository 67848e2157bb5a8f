//! Built-in quizzes. Every bank is built once at load time and shared
//! read-only afterwards.

pub mod cat_archetype;
pub mod enneagram;

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::QuizConfig;

use super::bank::{build_question_bank, QuestionBank, RuleSetError};
use super::definition::QuizDefinition;
use super::scoring::ScoringEngine;

/// Error raised while assembling the built-in definitions.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid option rule pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
}

/// A definition together with its frozen bank and engine.
#[derive(Debug, Clone)]
pub struct BuiltQuiz {
    definition: Arc<QuizDefinition>,
    bank: Arc<QuestionBank>,
    engine: ScoringEngine,
}

impl BuiltQuiz {
    pub fn new(definition: QuizDefinition, source: &str) -> Self {
        let bank = build_question_bank(source, &definition);
        let definition = Arc::new(definition);
        Self {
            engine: ScoringEngine::new(Arc::clone(&definition)),
            definition,
            bank: Arc::new(bank),
        }
    }

    pub fn key(&self) -> &str {
        &self.definition.key
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            key: self.definition.key.clone(),
            title: self.definition.title.clone(),
            description: self.definition.description.clone(),
            questions: self.bank.len(),
            complete: self.bank.is_complete(),
            strategy: self.definition.strategy.label(),
        }
    }
}

/// Listing entry for one quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    pub key: String,
    pub title: String,
    pub description: String,
    pub questions: usize,
    pub complete: bool,
    pub strategy: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    quizzes: Vec<BuiltQuiz>,
}

impl QuizCatalog {
    /// Embedded tables only.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::load(&QuizConfig::default())
    }

    /// Built-in definitions, reading `<data_dir>/<key>.csv` in place of the
    /// embedded table where such a file exists.
    pub fn load(config: &QuizConfig) -> Result<Self, CatalogError> {
        let definitions = vec![enneagram::definition(), cat_archetype::definition()?];
        Ok(Self::from_definitions(definitions, config.data_dir.as_deref()))
    }

    pub fn from_definitions(definitions: Vec<QuizDefinition>, data_dir: Option<&Path>) -> Self {
        let quizzes = definitions
            .into_iter()
            .map(|definition| {
                let source = source_for(&definition, data_dir);
                BuiltQuiz::new(definition, &source)
            })
            .collect();
        Self { quizzes }
    }

    pub fn get(&self, key: &str) -> Option<&BuiltQuiz> {
        self.quizzes.iter().find(|quiz| quiz.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltQuiz> {
        self.quizzes.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.quizzes.iter().map(BuiltQuiz::key).collect()
    }

    pub fn summaries(&self) -> Vec<QuizSummary> {
        self.quizzes.iter().map(BuiltQuiz::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

fn source_for(definition: &QuizDefinition, data_dir: Option<&Path>) -> Cow<'static, str> {
    let Some(dir) = data_dir else {
        return Cow::Borrowed(definition.source);
    };

    let path = dir.join(format!("{}.csv", definition.key));
    if !path.is_file() {
        return Cow::Borrowed(definition.source);
    }

    match fs::read_to_string(&path) {
        Ok(text) => {
            info!(quiz = %definition.key, path = %path.display(), "using quiz table override");
            Cow::Owned(text)
        }
        Err(error) => {
            warn!(
                quiz = %definition.key,
                path = %path.display(),
                error = %error,
                "quiz table override unreadable; using embedded table"
            );
            Cow::Borrowed(definition.source)
        }
    }
}
