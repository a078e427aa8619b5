use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::scoring;
use crate::app_state::AppState;
use crate::db::models::{
    ExamAttempt, ExamFilter, NewExam, NewExamQuestion, PersonStatus, StartAttempt, SubmitAttempt,
    TakerQuestion, UpdateExam, UpdateExamQuestion,
};
use crate::db::repositories::{ExamRepository, TraineeRepository};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct StartAttemptResponse {
    pub attempt: ExamAttempt,
    pub questions: Vec<TakerQuestion>,
}

pub async fn create_exam(
    State(state): State<AppState>,
    Json(payload): Json<NewExam>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let exam = ExamRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

pub async fn list_exams(
    State(state): State<AppState>,
    Query(filter): Query<ExamFilter>,
) -> AppResult<impl IntoResponse> {
    let exams = ExamRepository::list(&state.db, &filter).await?;
    Ok(Json(exams))
}

pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let exam = ExamRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("exam not found".into()))?;
    Ok(Json(exam))
}

/// Partial update; publishing and unpublishing happen here via
/// `is_published`.
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExam>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let exam = ExamRepository::update(&state.db, id, &payload).await?;
    Ok(Json(exam))
}

pub async fn add_question(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
    Json(payload): Json<NewExamQuestion>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    ExamRepository::get_by_id(&state.db, exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("exam not found".into()))?;

    let question = ExamRepository::add_question(&state.db, exam_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Admin view of the question bank, `correct_answer` included. Exam takers
/// get the `TakerQuestion` projection from the attempt endpoint instead.
pub async fn list_questions(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let questions = ExamRepository::list_questions(&state.db, exam_id).await?;
    Ok(Json(questions))
}

pub async fn update_question(
    State(state): State<AppState>,
    Path((exam_id, question_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateExamQuestion>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let question =
        ExamRepository::update_question(&state.db, exam_id, question_id, &payload).await?;
    Ok(Json(question))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path((exam_id, question_id)): Path<(Uuid, Uuid)>,
) -> AppResult<impl IntoResponse> {
    let deleted = ExamRepository::delete_question(&state.db, exam_id, question_id).await?;
    if !deleted {
        return Err(AppError::NotFound("question not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Opens an attempt for a trainee. The exam must be published and have at
/// least one question, the trainee must be active, and each trainee gets a
/// single attempt per exam.
pub async fn start_attempt(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
    Json(payload): Json<StartAttempt>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let exam = ExamRepository::get_by_id(&state.db, exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("exam not found".into()))?;
    if !exam.is_published {
        return Err(AppError::Conflict("exam is not published".into()));
    }

    let trainee = TraineeRepository::get_by_id(&state.db, payload.trainee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("trainee not found".into()))?;
    if trainee.status != PersonStatus::Active {
        return Err(AppError::Conflict("trainee is not active".into()));
    }

    let questions = ExamRepository::list_questions(&state.db, exam_id).await?;
    if questions.is_empty() {
        return Err(AppError::Conflict("exam has no questions".into()));
    }

    if ExamRepository::find_attempt(&state.db, exam_id, payload.trainee_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "trainee has already attempted this exam".into(),
        ));
    }

    // The unique index turns a racing duplicate into a 409 as well.
    let attempt =
        ExamRepository::start_attempt(&state.db, exam_id, payload.trainee_id, questions.len() as i32)
            .await?;

    let response = StartAttemptResponse {
        attempt,
        questions: questions.into_iter().map(Into::into).collect(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Scores the submitted answers and finalizes the attempt.
pub async fn submit_attempt(
    State(state): State<AppState>,
    Path((exam_id, attempt_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SubmitAttempt>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let attempt = ExamRepository::get_attempt(&state.db, attempt_id)
        .await?
        .filter(|attempt| attempt.exam_id == exam_id)
        .ok_or_else(|| AppError::NotFound("attempt not found".into()))?;
    if attempt.is_submitted() {
        return Err(AppError::Conflict("attempt is already submitted".into()));
    }

    let exam = ExamRepository::get_by_id(&state.db, exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("exam not found".into()))?;
    let questions = ExamRepository::list_questions(&state.db, exam_id).await?;

    let score = scoring::score_attempt(&questions, &payload.answers, exam.pass_mark);
    let answers = serde_json::to_value(&payload.answers)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;

    let attempt = ExamRepository::submit_attempt(&state.db, attempt.id, &answers, &score).await?;
    Ok(Json(attempt))
}

pub async fn list_exam_attempts(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let attempts = ExamRepository::list_attempts_for_exam(&state.db, exam_id).await?;
    Ok(Json(attempts))
}

/// Aggregated results table for one exam.
pub async fn exam_results(
    State(state): State<AppState>,
    Path(exam_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    ExamRepository::get_by_id(&state.db, exam_id)
        .await?
        .ok_or_else(|| AppError::NotFound("exam not found".into()))?;

    let summary = ExamRepository::results_summary(&state.db, exam_id).await?;
    Ok(Json(summary))
}

/// A trainee's attempts across every exam.
pub async fn list_trainee_attempts(
    State(state): State<AppState>,
    Path(trainee_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let attempts = ExamRepository::list_attempts_for_trainee(&state.db, trainee_id).await?;
    Ok(Json(attempts))
}
