use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_conversation, get_inbox, mark_read, send_message};
use crate::app_state::AppState;

pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message).get(get_conversation))
        .route("/inbox", get(get_inbox))
        .route("/:id/read", post(mark_read))
}
