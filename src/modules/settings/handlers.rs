use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewPortalSetting, UpsertPortalSetting};
use crate::db::repositories::SettingRepository;
use crate::error::{AppError, AppResult};

pub async fn create_setting(
    State(state): State<AppState>,
    Json(payload): Json<NewPortalSetting>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let setting = SettingRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(setting)))
}

pub async fn list_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingRepository::list(&state.db).await?;
    Ok(Json(settings))
}

pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let setting = SettingRepository::get_by_key(&state.db, &key)
        .await?
        .ok_or_else(|| AppError::NotFound("setting not found".into()))?;
    Ok(Json(setting))
}

/// Creates or replaces the value stored under the key.
pub async fn upsert_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<UpsertPortalSetting>,
) -> AppResult<impl IntoResponse> {
    let setting = SettingRepository::upsert(&state.db, &key, &payload).await?;
    Ok(Json(setting))
}
