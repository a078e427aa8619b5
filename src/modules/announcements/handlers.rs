use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{AnnouncementFilter, NewAnnouncement, NewAnnouncementReply, UpdateAnnouncement};
use crate::db::repositories::AnnouncementRepository;
use crate::error::{AppError, AppResult};

pub async fn create_announcement(
    State(state): State<AppState>,
    Json(payload): Json<NewAnnouncement>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let announcement = AnnouncementRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Without query parameters this is the admin view: everything, including
/// deactivated announcements. With `audience` (a reader role) and optionally
/// `sponsor_id`, visibility is applied the way the portal shows boards:
/// announcements for `all` plus the role's own, sponsor-scoped plus global.
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(filter): Query<AnnouncementFilter>,
) -> AppResult<impl IntoResponse> {
    let mut announcements = AnnouncementRepository::list(&state.db).await?;
    if let Some(role) = filter.audience {
        announcements.retain(|announcement| announcement.visible_to(role, filter.sponsor_id));
    }
    Ok(Json(announcements))
}

pub async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let announcement = AnnouncementRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("announcement not found".into()))?;
    Ok(Json(announcement))
}

pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAnnouncement>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let announcement = AnnouncementRepository::update(&state.db, id, &payload).await?;
    Ok(Json(announcement))
}

pub async fn deactivate_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    AnnouncementRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("announcement not found".into()))?;
    let announcement = AnnouncementRepository::deactivate(&state.db, id).await?;
    Ok(Json(announcement))
}

pub async fn create_reply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewAnnouncementReply>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    AnnouncementRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("announcement not found".into()))?;

    let reply = AnnouncementRepository::add_reply(&state.db, id, &payload).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

pub async fn list_replies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let replies = AnnouncementRepository::list_replies(&state.db, id).await?;
    Ok(Json(replies))
}
