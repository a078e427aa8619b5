use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewSponsor, SponsorFilter, UpdateSponsor};
use crate::db::repositories::SponsorRepository;
use crate::error::{AppError, AppResult};

pub async fn create_sponsor(
    State(state): State<AppState>,
    Json(payload): Json<NewSponsor>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let sponsor = SponsorRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(sponsor)))
}

pub async fn list_sponsors(
    State(state): State<AppState>,
    Query(filter): Query<SponsorFilter>,
) -> AppResult<impl IntoResponse> {
    let sponsors = SponsorRepository::list(&state.db, &filter).await?;
    Ok(Json(sponsors))
}

pub async fn get_sponsor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let sponsor = SponsorRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("sponsor not found".into()))?;
    Ok(Json(sponsor))
}

/// Partial update; deactivation happens here via `is_active = false`.
/// Sponsors are never hard-deleted.
pub async fn update_sponsor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSponsor>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let sponsor = SponsorRepository::update(&state.db, id, &payload).await?;
    Ok(Json(sponsor))
}
