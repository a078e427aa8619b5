use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{AssignId, GenerateIds, GeneratedId, IdFilter, IdStatus};
use crate::db::repositories::IdRepository;
use crate::error::{AppError, AppResult};

pub async fn generate_ids(
    State(state): State<AppState>,
    Json(payload): Json<GenerateIds>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let generated = IdRepository::generate_batch(&state.db, payload.kind, payload.count).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

pub async fn list_ids(
    State(state): State<AppState>,
    Query(filter): Query<IdFilter>,
) -> AppResult<impl IntoResponse> {
    let ids = IdRepository::list(&state.db, &filter).await?;
    Ok(Json(ids))
}

pub async fn get_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let record = fetch(&state, id).await?;
    Ok(Json(record))
}

pub async fn assign_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignId>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let record = fetch(&state, id).await?;
    ensure_transition(&record, IdStatus::Assigned)?;

    let record =
        IdRepository::mark_assigned(&state.db, id, payload.holder_id, &payload.holder_name).await?;
    Ok(Json(record))
}

pub async fn activate_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let record = fetch(&state, id).await?;
    ensure_transition(&record, IdStatus::Activated)?;

    let record = IdRepository::mark_activated(&state.db, id).await?;
    Ok(Json(record))
}

pub async fn deactivate_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let record = fetch(&state, id).await?;
    ensure_transition(&record, IdStatus::Deactivated)?;

    let record = IdRepository::mark_deactivated(&state.db, id).await?;
    Ok(Json(record))
}

/// Returns a held code to the pool so it can be assigned to someone else.
pub async fn release_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let record = fetch(&state, id).await?;
    if !record.status.can_release() {
        return Err(AppError::Conflict(format!(
            "{} is already available",
            record.code
        )));
    }

    let record = IdRepository::release(&state.db, id).await?;
    Ok(Json(record))
}

async fn fetch(state: &AppState, id: Uuid) -> AppResult<GeneratedId> {
    IdRepository::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("generated ID not found".into()))
}

fn ensure_transition(record: &GeneratedId, next: IdStatus) -> AppResult<()> {
    if !record.status.can_transition_to(next) {
        return Err(AppError::Conflict(format!(
            "{} cannot move from {} to {}",
            record.code, record.status, next
        )));
    }
    Ok(())
}
