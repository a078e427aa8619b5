use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{ContentFilter, NewStoredFile, NewVideo, UpdateStoredFile, UpdateVideo};
use crate::db::repositories::ContentRepository;
use crate::error::{AppError, AppResult};

// Metadata records only; the bytes live in the hosted object store and the
// client talks to it directly.

pub async fn create_video(
    State(state): State<AppState>,
    Json(payload): Json<NewVideo>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let video = ContentRepository::create_video(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// Filtered by `sponsor_id`, the listing is that sponsor's videos plus the
/// global (unscoped) ones.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(filter): Query<ContentFilter>,
) -> AppResult<impl IntoResponse> {
    let videos = ContentRepository::list_videos(&state.db, &filter).await?;
    Ok(Json(videos))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let video = ContentRepository::get_video(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("video not found".into()))?;
    Ok(Json(video))
}

pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVideo>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let video = ContentRepository::update_video(&state.db, id, &payload).await?;
    Ok(Json(video))
}

pub async fn deactivate_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    ContentRepository::get_video(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("video not found".into()))?;
    let video = ContentRepository::deactivate_video(&state.db, id).await?;
    Ok(Json(video))
}

pub async fn create_file(
    State(state): State<AppState>,
    Json(payload): Json<NewStoredFile>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let file = ContentRepository::create_file(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

pub async fn list_files(
    State(state): State<AppState>,
    Query(filter): Query<ContentFilter>,
) -> AppResult<impl IntoResponse> {
    let files = ContentRepository::list_files(&state.db, &filter).await?;
    Ok(Json(files))
}

pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let file = ContentRepository::get_file(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("file not found".into()))?;
    Ok(Json(file))
}

pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStoredFile>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let file = ContentRepository::update_file(&state.db, id, &payload).await?;
    Ok(Json(file))
}

pub async fn deactivate_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    ContentRepository::get_file(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("file not found".into()))?;
    let file = ContentRepository::deactivate_file(&state.db, id).await?;
    Ok(Json(file))
}
