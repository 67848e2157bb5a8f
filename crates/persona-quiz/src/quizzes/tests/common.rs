use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::quizzes::catalog::{cat_archetype, QuizCatalog};
use crate::quizzes::collaborators::{ResultCache, StaticArtwork};
use crate::quizzes::scoring::QuizResult;
use crate::quizzes::service::{QuizService, ScoreRequest};
use crate::quizzes::{quiz_router, Question};

/// Cache that records every call.
#[derive(Default)]
pub(super) struct MemoryCache {
    pub(super) entries: Mutex<HashMap<String, QuizResult>>,
    pub(super) loads: Mutex<Vec<String>>,
}

impl ResultCache for MemoryCache {
    fn load(&self, key: &str) -> Option<QuizResult> {
        self.loads.lock().expect("loads mutex").push(key.to_string());
        self.entries.lock().expect("entries mutex").get(key).cloned()
    }

    fn save(&self, key: &str, result: &QuizResult) {
        self.entries
            .lock()
            .expect("entries mutex")
            .insert(key.to_string(), result.clone());
    }
}

pub(super) type TestService = QuizService<MemoryCache, StaticArtwork>;

pub(super) fn catalog() -> Arc<QuizCatalog> {
    Arc::new(QuizCatalog::builtin().expect("catalog builds"))
}

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryCache>) {
    let catalog = catalog();
    let cache = Arc::new(MemoryCache::default());
    let artwork = Arc::new(StaticArtwork::from_catalog(&catalog, "/art"));
    let service = Arc::new(QuizService::new(catalog, Arc::clone(&cache), artwork));
    (service, cache)
}

pub(super) fn quiz_router_with_service(service: Arc<TestService>) -> axum::Router {
    quiz_router(service)
}

pub(super) fn cat_questions() -> Vec<Question> {
    let catalog = catalog();
    catalog
        .get(cat_archetype::KEY)
        .expect("cat archetype")
        .bank()
        .questions
        .clone()
}

/// Picks the option at `ordinal` on every question.
pub(super) fn answers_at(questions: &[Question], ordinal: usize) -> Vec<Option<String>> {
    questions
        .iter()
        .map(|question| question.options.get(ordinal).map(|option| option.id.clone()))
        .collect()
}

pub(super) fn request(answers: Vec<Option<String>>, session: Option<&str>) -> ScoreRequest {
    ScoreRequest {
        answers,
        session: session.map(str::to_string),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
