use super::common::*;

use crate::quizzes::catalog::{cat_archetype, enneagram};
use crate::quizzes::domain::AnswerSelection;
use crate::quizzes::service::QuizServiceError;

#[test]
fn list_reports_every_builtin_quiz() {
    let (service, _) = build_service();
    let summaries = service.list();
    let keys: Vec<_> = summaries.iter().map(|summary| summary.key.as_str()).collect();
    assert_eq!(keys, vec![enneagram::KEY, cat_archetype::KEY]);
    assert_eq!(summaries[0].questions, 27);
    assert_eq!(summaries[0].strategy, "raw magnitude");
    assert_eq!(summaries[1].questions, 12);
    assert!(summaries.iter().all(|summary| summary.complete));
}

#[test]
fn questions_for_unknown_quiz_is_an_error() {
    let (service, _) = build_service();
    assert_eq!(
        service.questions("tarot").unwrap_err(),
        QuizServiceError::UnknownQuiz("tarot".to_string())
    );
}

#[test]
fn cat_questions_interleave_facets() {
    let (service, _) = build_service();
    let set = service.questions(cat_archetype::KEY).expect("questions");
    let facets: Vec<_> = set
        .questions
        .iter()
        .take(4)
        .map(|question| question.outcome.as_str())
        .collect();
    assert_eq!(facets, vec!["play", "rest", "people", "territory"]);
    assert_eq!(set.shortfall, 0);
}

#[test]
fn cozy_answers_select_the_napper() {
    let (service, _) = build_service();
    let answers = answers_at(&cat_questions(), 2);
    let response = service
        .score(cat_archetype::KEY, request(answers, None))
        .expect("scored");

    let top = response.result.top_candidate.expect("top candidate");
    assert_eq!(top.key, "napper");
    assert_eq!(top.rank, 1);
    assert_eq!(response.result.answered, 12);
    assert_eq!(response.result.top_candidates.len(), 3);
    assert!(!response.cached);
    assert_eq!(
        response.artwork.map(|artwork| artwork.url),
        Some("/art/cat-archetype/napper.png".to_string())
    );
}

#[test]
fn adventurous_answers_select_the_explorer() {
    let (service, _) = build_service();
    let answers = answers_at(&cat_questions(), 0);
    let response = service
        .score(cat_archetype::KEY, request(answers, None))
        .expect("scored");
    let top = response.result.top_candidate.expect("top candidate");
    assert_eq!(top.key, "explorer");
    assert!(response.result.narrative.starts_with("The Rooftop Explorer."));
}

#[test]
fn empty_answers_produce_a_partial_result() {
    let (service, _) = build_service();
    let response = service
        .score(cat_archetype::KEY, request(Vec::new(), None))
        .expect("scored");
    let result = response.result;
    assert_eq!(result.answered, 0);
    assert_eq!(result.total, 12);
    assert!(result
        .preference_vector
        .values
        .entries()
        .iter()
        .all(|entry| entry.value == 50.0));
    assert!(result
        .answers
        .iter()
        .all(|answer| answer.selection == AnswerSelection::Unanswered));
    assert_eq!(result.ranked_candidates.len(), 6);
}

#[test]
fn session_results_are_cached() {
    let (service, cache) = build_service();
    let questions = cat_questions();

    let first = service
        .score(cat_archetype::KEY, request(answers_at(&questions, 2), Some("abc")))
        .expect("first score");
    assert!(!first.cached);
    assert!(cache
        .entries
        .lock()
        .expect("entries mutex")
        .contains_key("cat-archetype:abc"));

    let second = service
        .score(cat_archetype::KEY, request(answers_at(&questions, 2), Some("abc")))
        .expect("second score");
    assert!(second.cached);
    assert_eq!(second.result, first.result);
}

#[test]
fn changed_answers_rescore_the_session() {
    let (service, cache) = build_service();
    let questions = cat_questions();
    let mut partial = answers_at(&questions, 0);
    partial.truncate(1);

    let first = service
        .score(cat_archetype::KEY, request(partial, Some("abc")))
        .expect("partial score");
    assert_eq!(first.result.answered, 1);

    let second = service
        .score(cat_archetype::KEY, request(answers_at(&questions, 0), Some("abc")))
        .expect("completed score");
    assert!(!second.cached);
    assert_eq!(second.result.answered, 12);
    assert_eq!(
        second.result.top_candidate.map(|top| top.key),
        Some("explorer".to_string())
    );

    let stored = cache
        .entries
        .lock()
        .expect("entries mutex")
        .get("cat-archetype:abc")
        .map(|result| result.answered);
    assert_eq!(stored, Some(12));
}

#[test]
fn blank_session_skips_the_cache() {
    let (service, cache) = build_service();
    service
        .score(cat_archetype::KEY, request(Vec::new(), Some("   ")))
        .expect("scored");
    assert!(cache.loads.lock().expect("loads mutex").is_empty());
    assert!(cache.entries.lock().expect("entries mutex").is_empty());
}

#[test]
fn scoring_unknown_quiz_is_an_error() {
    let (service, _) = build_service();
    let error = service.score("tarot", request(Vec::new(), None)).unwrap_err();
    assert_eq!(error.to_string(), "unknown quiz 'tarot'");
}
