use std::sync::Arc;

use persona_quiz::quizzes::catalog::{cat_archetype, enneagram, QuizCatalog};
use persona_quiz::quizzes::domain::{CandidateProfile, Dimension, Question, Scale, VectorSpace};
use persona_quiz::quizzes::scoring::aggregate;
use persona_quiz::quizzes::{
    InMemoryResultCache, QuizService, ScoreRequest, ScoringStrategy, StaticArtwork,
};

fn catalog() -> Arc<QuizCatalog> {
    Arc::new(QuizCatalog::builtin().expect("catalog builds"))
}

/// Strongest agreement with `favoured` statements, strongest disagreement
/// with the rest, honouring reverse scoring through the option scalars.
fn enneagram_answers(questions: &[Question], favoured: &str) -> Vec<Option<String>> {
    questions
        .iter()
        .map(|question| {
            let wanted = if question.outcome == favoured { 5.0 } else { 1.0 };
            question
                .options
                .iter()
                .find(|option| option.score == Some(wanted))
                .map(|option| option.id.clone())
        })
        .collect()
}

#[test]
fn reverse_scored_agreement_contributes_the_minimum() {
    let catalog = catalog();
    let quiz = catalog.get(enneagram::KEY).expect("enneagram");
    let reversed = quiz
        .bank()
        .questions
        .iter()
        .find(|question| question.id == "e03")
        .expect("reverse-scored statement in bank");

    let agree = &reversed.options[0];
    assert_eq!(agree.label, "Strongly agree");
    assert_eq!(agree.score, Some(1.0));

    let preference = aggregate(
        std::slice::from_ref(reversed),
        &[Some(agree.id.clone())],
        &quiz.definition().space,
    );
    assert_eq!(preference.value(&reversed.outcome), Some(1.0));
}

#[test]
fn enneagram_favours_the_answered_type() {
    let catalog = catalog();
    let quiz = catalog.get(enneagram::KEY).expect("enneagram");
    let answers = enneagram_answers(&quiz.bank().questions, "type5");
    let result = quiz.engine().score(&quiz.bank().questions, &answers);

    assert_eq!(result.answered, 27);
    let top = result.top_candidate.expect("top candidate");
    assert_eq!(top.key, "type5");
    assert_eq!(top.score, 100);

    let runners_up: Vec<_> = result.top_candidates[1..]
        .iter()
        .map(|candidate| (candidate.key.as_str(), candidate.score))
        .collect();
    assert_eq!(runners_up, vec![("type4", 45), ("type6", 45)]);
    assert!(result.narrative.contains("The Investigator"));
    assert!(result.narrative.contains("insight"));
}

#[test]
fn exact_match_candidate_scores_one_hundred() {
    let space = VectorSpace::new(
        vec![Dimension::new("a", "A"), Dimension::new("b", "B")],
        Scale::new(0.0, 10.0),
    );
    let candidate = CandidateProfile {
        key: "mirror".into(),
        name: "Mirror".into(),
        description: String::new(),
        narrative: "{name}".into(),
        vector: space.vector(&[("a", 7.0), ("b", 2.0)]),
    };
    let preference = persona_quiz::quizzes::scoring::PreferenceVector {
        values: space.vector(&[("a", 7.0), ("b", 2.0)]),
        weights: space.filled(4.0),
    };
    let scored = ScoringStrategy::default().score(&preference, &[candidate], &space);
    assert_eq!(scored[0].score, 100);
}

#[test]
fn scoring_is_deterministic_across_runs() {
    let catalog = catalog();
    let quiz = catalog.get(cat_archetype::KEY).expect("cats");
    let questions = &quiz.bank().questions;
    let answers: Vec<Option<String>> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            question
                .options
                .get(index % question.options.len())
                .map(|option| option.id.clone())
        })
        .collect();

    let first = quiz.engine().score(questions, &answers);
    let second = quiz.engine().score(questions, &answers);
    assert_eq!(first, second);
    assert!(first
        .ranked_candidates
        .iter()
        .all(|candidate| candidate.score <= 100));
    let ranks: Vec<usize> = first.ranked_candidates.iter().map(|c| c.rank).collect();
    assert_eq!(ranks, (1..=first.ranked_candidates.len()).collect::<Vec<_>>());
}

#[test]
fn service_caches_by_session_with_the_real_cache() {
    let catalog = catalog();
    let artwork = Arc::new(StaticArtwork::from_catalog(&catalog, "/art"));
    let cache = Arc::new(InMemoryResultCache::new(chrono::Duration::minutes(5)));
    let service = QuizService::new(catalog, cache, artwork);

    let request = ScoreRequest {
        answers: Vec::new(),
        session: Some("visitor-1".to_string()),
    };
    let first = service
        .score(cat_archetype::KEY, request.clone())
        .expect("scored");
    let second = service.score(cat_archetype::KEY, request).expect("scored");

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.result, second.result);
    assert!(second.artwork.is_some());
}
