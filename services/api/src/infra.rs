use metrics_exporter_prometheus::PrometheusHandle;
use persona_quiz::config::QuizConfig;
use persona_quiz::error::AppError;
use persona_quiz::quizzes::{
    InMemoryResultCache, Question, QuizCatalog, QuizService, StaticArtwork,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Base path result artwork is served from.
pub(crate) const ARTWORK_BASE_URL: &str = "/static/art";

pub(crate) type ApiQuizService = QuizService<InMemoryResultCache, StaticArtwork>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_catalog(config: &QuizConfig) -> Result<Arc<QuizCatalog>, AppError> {
    Ok(Arc::new(QuizCatalog::load(config)?))
}

pub(crate) fn build_service(config: &QuizConfig) -> Result<Arc<ApiQuizService>, AppError> {
    let catalog = load_catalog(config)?;
    let artwork = Arc::new(StaticArtwork::from_catalog(&catalog, ARTWORK_BASE_URL));
    let cache = Arc::new(InMemoryResultCache::from_config(config));
    Ok(Arc::new(QuizService::new(catalog, cache, artwork)))
}

/// Splits `a,b,-,3` into answer tokens. `-` and empty tokens mean unanswered;
/// bare numbers pick the option at that 1-based position.
pub(crate) fn parse_answers(raw: &str, questions: &[Question]) -> Vec<Option<String>> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| match token {
            "" | "-" => None,
            token => match token.parse::<usize>() {
                Ok(position) => questions
                    .get(index)
                    .and_then(|question| question.options.get(position.checked_sub(1)?))
                    .map(|option| option.id.clone()),
                Err(_) => Some(token.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_quiz::quizzes::catalog::cat_archetype;

    fn cat_questions() -> Vec<Question> {
        let catalog = QuizCatalog::builtin().expect("catalog builds");
        catalog
            .get(cat_archetype::KEY)
            .expect("cats")
            .bank()
            .questions
            .clone()
    }

    #[test]
    fn parses_ids_positions_and_gaps() {
        let questions = cat_questions();
        let first_id = questions[0].options[1].id.clone();
        let raw = format!("{first_id},3,-,,9");
        let answers = parse_answers(&raw, &questions);

        assert_eq!(answers.len(), 5);
        assert_eq!(answers[0], Some(first_id));
        assert_eq!(answers[1], Some(questions[1].options[2].id.clone()));
        assert_eq!(answers[2], None);
        assert_eq!(answers[3], None);
        assert_eq!(answers[4], None);
    }

    #[test]
    fn empty_input_means_no_answers() {
        assert!(parse_answers("  ", &cat_questions()).is_empty());
    }

    #[test]
    fn service_builds_from_default_config() {
        let service = build_service(&QuizConfig::default()).expect("service builds");
        assert_eq!(service.list().len(), 2);
    }
}
