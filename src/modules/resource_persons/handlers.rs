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
use crate::db::models::{NewResourcePerson, PersonStatus, UpdateResourcePerson};
use crate::db::repositories::ResourcePersonRepository;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ResourcePersonListQuery {
    pub status: Option<PersonStatus>,
}

/// Resource persons are created by an admin and start `active`, holding an
/// RP code claimed from the pool at creation.
pub async fn create_resource_person(
    State(state): State<AppState>,
    Json(payload): Json<NewResourcePerson>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let rp = ResourcePersonRepository::create(&state.db, &payload)
        .await?
        .ok_or_else(|| AppError::Conflict("no available resource-person ID to assign".into()))?;
    Ok((StatusCode::CREATED, Json(rp)))
}

pub async fn list_resource_persons(
    State(state): State<AppState>,
    Query(query): Query<ResourcePersonListQuery>,
) -> AppResult<impl IntoResponse> {
    let rps = ResourcePersonRepository::list(&state.db, query.status).await?;
    Ok(Json(rps))
}

pub async fn get_resource_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let rp = ResourcePersonRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("resource person not found".into()))?;
    Ok(Json(rp))
}

pub async fn update_resource_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateResourcePerson>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let rp = ResourcePersonRepository::update(&state.db, id, &payload).await?;
    Ok(Json(rp))
}

pub async fn deactivate_resource_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let rp = ResourcePersonRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("resource person not found".into()))?;
    if rp.status == PersonStatus::Deactivated {
        return Err(AppError::Conflict(
            "resource person is already deactivated".into(),
        ));
    }

    let deactivated = ResourcePersonRepository::deactivate(&state.db, &rp).await?;
    Ok(Json(deactivated))
}
