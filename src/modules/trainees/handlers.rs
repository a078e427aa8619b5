use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    ApproveTrainee, IdKind, IdStatus, NewTrainee, PersonStatus, TraineeFilter, UpdateTrainee,
};
use crate::db::repositories::{IdRepository, TraineeRepository};
use crate::error::{AppError, AppResult};

/// Public registration endpoint. New trainees land in `pending` and wait for
/// an admin approval.
pub async fn register_trainee(
    State(state): State<AppState>,
    Json(payload): Json<NewTrainee>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let trainee = TraineeRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(trainee)))
}

pub async fn list_trainees(
    State(state): State<AppState>,
    Query(filter): Query<TraineeFilter>,
) -> AppResult<impl IntoResponse> {
    let trainees = TraineeRepository::list(&state.db, &filter).await?;
    Ok(Json(trainees))
}

pub async fn get_trainee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let trainee = TraineeRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("trainee not found".into()))?;
    Ok(Json(trainee))
}

pub async fn update_trainee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTrainee>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let trainee = TraineeRepository::update(&state.db, id, &payload).await?;
    Ok(Json(trainee))
}

/// Admin approval: claims a tag ID (a specific one, or the lowest available)
/// and activates the trainee in one transaction.
pub async fn approve_trainee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveTrainee>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let trainee = TraineeRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("trainee not found".into()))?;
    if trainee.status != PersonStatus::Pending {
        return Err(AppError::Conflict(format!(
            "trainee is not pending approval (status: {})",
            trainee.status
        )));
    }

    if let Some(tag_id) = payload.tag_id {
        let tag = IdRepository::get(&state.db, tag_id)
            .await?
            .ok_or_else(|| AppError::NotFound("tag ID not found".into()))?;
        if tag.kind != IdKind::Tag {
            return Err(AppError::BadRequest(format!(
                "{} is not a tag ID",
                tag.code
            )));
        }
        if !tag.status.can_transition_to(IdStatus::Assigned) {
            return Err(AppError::Conflict(format!(
                "{} is not available for assignment",
                tag.code
            )));
        }
    }

    let approved = TraineeRepository::approve(&state.db, &trainee, payload.tag_id)
        .await?
        .ok_or_else(|| AppError::Conflict("no available tag ID to assign".into()))?;

    Ok(Json(approved))
}

/// Soft deactivation; the tag ID the trainee holds is deactivated with them.
pub async fn deactivate_trainee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let trainee = TraineeRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("trainee not found".into()))?;
    if trainee.status == PersonStatus::Deactivated {
        return Err(AppError::Conflict("trainee is already deactivated".into()));
    }

    let deactivated = TraineeRepository::deactivate(&state.db, &trainee).await?;
    Ok(Json(deactivated))
}
