use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::collaborators::{ArtworkResolver, ResultCache};
use super::service::{QuizService, QuizServiceError, ScoreRequest};

/// Router exposing the quiz listing, question banks and scoring.
pub fn quiz_router<C, A>(service: Arc<QuizService<C, A>>) -> Router
where
    C: ResultCache + 'static,
    A: ArtworkResolver + 'static,
{
    Router::new()
        .route("/api/v1/quizzes", get(list_handler::<C, A>))
        .route(
            "/api/v1/quizzes/:quiz/questions",
            get(questions_handler::<C, A>),
        )
        .route("/api/v1/quizzes/:quiz/score", post(score_handler::<C, A>))
        .with_state(service)
}

pub(crate) async fn list_handler<C, A>(State(service): State<Arc<QuizService<C, A>>>) -> Response
where
    C: ResultCache + 'static,
    A: ArtworkResolver + 'static,
{
    let payload = json!({ "quizzes": service.list() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn questions_handler<C, A>(
    State(service): State<Arc<QuizService<C, A>>>,
    Path(quiz): Path<String>,
) -> Response
where
    C: ResultCache + 'static,
    A: ArtworkResolver + 'static,
{
    match service.questions(&quiz) {
        Ok(set) => (StatusCode::OK, Json(set)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<C, A>(
    State(service): State<Arc<QuizService<C, A>>>,
    Path(quiz): Path<String>,
    Json(request): Json<ScoreRequest>,
) -> Response
where
    C: ResultCache + 'static,
    A: ArtworkResolver + 'static,
{
    match service.score(&quiz, request) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: QuizServiceError) -> Response {
    let status = match error {
        QuizServiceError::UnknownQuiz(_) => StatusCode::NOT_FOUND,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
