use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{ConversationQuery, InboxQuery, NewMessage};
use crate::db::repositories::MessageRepository;
use crate::error::{AppError, AppResult};

pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<NewMessage>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let message = MessageRepository::create(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Full thread between one trainee and one resource person, oldest first.
pub async fn get_conversation(
    State(state): State<AppState>,
    Query(query): Query<ConversationQuery>,
) -> AppResult<impl IntoResponse> {
    let messages =
        MessageRepository::conversation(&state.db, query.trainee_id, query.resource_person_id)
            .await?;
    Ok(Json(messages))
}

/// Latest message per conversation for one party, newest first.
pub async fn get_inbox(
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> AppResult<impl IntoResponse> {
    if query.trainee_id.is_none() && query.resource_person_id.is_none() {
        return Err(AppError::BadRequest(
            "trainee_id or resource_person_id is required".into(),
        ));
    }

    let messages = MessageRepository::inbox(&state.db, &query).await?;
    Ok(Json(messages))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let message = MessageRepository::mark_read(&state.db, id).await?;
    Ok(Json(message))
}
