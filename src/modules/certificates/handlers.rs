use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{CertificateFilter, CertificateVerification, IssueCertificate};
use crate::db::repositories::{CertificateRepository, TraineeRepository};
use crate::error::{AppError, AppResult};

pub async fn issue_certificate(
    State(state): State<AppState>,
    Json(payload): Json<IssueCertificate>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    TraineeRepository::get_by_id(&state.db, payload.trainee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("trainee not found".into()))?;

    let certificate = CertificateRepository::issue(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(certificate)))
}

pub async fn list_certificates(
    State(state): State<AppState>,
    Query(filter): Query<CertificateFilter>,
) -> AppResult<impl IntoResponse> {
    let certificates = CertificateRepository::list(&state.db, &filter).await?;
    Ok(Json(certificates))
}

pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let certificate = CertificateRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("certificate not found".into()))?;
    Ok(Json(certificate))
}

/// Public serial lookup. Unknown and revoked serials both come back as a
/// not-found verification failure; the payload never says which.
pub async fn verify_certificate(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> AppResult<impl IntoResponse> {
    let certificate = CertificateRepository::get_by_serial(&state.db, &serial).await?;

    match certificate {
        Some(certificate) if !certificate.revoked => Ok((
            StatusCode::OK,
            Json(CertificateVerification {
                valid: true,
                certificate: Some(certificate),
            }),
        )),
        _ => Ok((
            StatusCode::NOT_FOUND,
            Json(CertificateVerification {
                valid: false,
                certificate: None,
            }),
        )),
    }
}

pub async fn revoke_certificate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let certificate = CertificateRepository::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("certificate not found".into()))?;
    if certificate.revoked {
        return Err(AppError::Conflict("certificate is already revoked".into()));
    }

    let certificate = CertificateRepository::revoke(&state.db, id).await?;
    Ok(Json(certificate))
}
