use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use secrecy::ExposeSecret;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{AdminLogin, NewAdmin, UpdateAdmin};
use crate::db::repositories::AdminRepository;
use crate::error::{AppError, AppResult};

/// Verifies the password against the stored bcrypt hash and stamps
/// `last_login_at`. Unknown email and wrong password are indistinguishable
/// to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLogin>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let admin = AdminRepository::get_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::Authentication("invalid email or password".into()))?;

    if !admin.is_active {
        return Err(AppError::Authentication("account is deactivated".into()));
    }

    let password_ok = bcrypt::verify(payload.password.expose_secret(), &admin.password_hash)
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;
    if !password_ok {
        return Err(AppError::Authentication("invalid email or password".into()));
    }

    let admin = AdminRepository::record_login(&state.db, admin.id).await?;
    Ok(Json(admin))
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<NewAdmin>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let admin = AdminRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn list_admins(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let admins = AdminRepository::list(&state.db).await?;
    Ok(Json(admins))
}

pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let admin = AdminRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("admin not found".into()))?;
    Ok(Json(admin))
}

pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdmin>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let admin = AdminRepository::update(&state.db, id, &payload).await?;
    Ok(Json(admin))
}

/// Aggregate counts backing the admin dashboard cards.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let counts = AdminRepository::dashboard_counts(&state.db).await?;
    Ok(Json(counts))
}
