use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_question, create_exam, delete_question, exam_results, get_exam, list_exam_attempts,
    list_exams, list_questions, list_trainee_attempts, start_attempt, submit_attempt, update_exam,
    update_question,
};
use crate::app_state::AppState;

pub fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam).get(list_exams))
        .route("/:id", get(get_exam).put(update_exam))
        .route("/:id/questions", post(add_question).get(list_questions))
        .route(
            "/:id/questions/:qid",
            put(update_question).delete(delete_question),
        )
        .route("/:id/attempts", post(start_attempt).get(list_exam_attempts))
        .route("/:id/attempts/:attempt_id/submit", post(submit_attempt))
        .route("/:id/results", get(exam_results))
}

/// Trainee-scoped results listing, nested under `/api/trainees`.
pub fn trainee_attempt_routes() -> Router<AppState> {
    Router::new().route("/:id/attempts", get(list_trainee_attempts))
}
