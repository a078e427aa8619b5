use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_announcement, create_reply, deactivate_announcement, get_announcement,
    list_announcements, list_replies, update_announcement,
};
use crate::app_state::AppState;

pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_announcement).get(list_announcements))
        .route("/:id", get(get_announcement).put(update_announcement))
        .route("/:id/deactivate", post(deactivate_announcement))
        .route("/:id/replies", post(create_reply).get(list_replies))
}
