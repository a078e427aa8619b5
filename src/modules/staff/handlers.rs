use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewStaff, PersonStatus, UpdateStaff};
use crate::db::repositories::StaffRepository;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub status: Option<PersonStatus>,
}

/// Staff are created by an admin and start `active`, holding a staff code
/// claimed from the pool at creation.
pub async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<NewStaff>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let staff = StaffRepository::create(&state.db, &payload)
        .await?
        .ok_or_else(|| AppError::Conflict("no available staff ID to assign".into()))?;
    Ok((StatusCode::CREATED, Json(staff)))
}

pub async fn list_staff(
    State(state): State<AppState>,
    Query(query): Query<StaffListQuery>,
) -> AppResult<impl IntoResponse> {
    let staff = StaffRepository::list(&state.db, query.status).await?;
    Ok(Json(staff))
}

pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let staff = StaffRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("staff member not found".into()))?;
    Ok(Json(staff))
}

pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStaff>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let staff = StaffRepository::update(&state.db, id, &payload).await?;
    Ok(Json(staff))
}

pub async fn deactivate_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let staff = StaffRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("staff member not found".into()))?;
    if staff.status == PersonStatus::Deactivated {
        return Err(AppError::Conflict("staff member is already deactivated".into()));
    }

    let deactivated = StaffRepository::deactivate(&state.db, &staff).await?;
    Ok(Json(deactivated))
}
