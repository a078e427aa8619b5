use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_file, create_video, deactivate_file, deactivate_video, get_file, get_video, list_files,
    list_videos, update_file, update_video,
};
use crate::app_state::AppState;

pub fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_video).get(list_videos))
        .route("/:id", get(get_video).put(update_video))
        .route("/:id/deactivate", post(deactivate_video))
}

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_file).get(list_files))
        .route("/:id", get(get_file).put(update_file))
        .route("/:id/deactivate", post(deactivate_file))
}
