use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    activate_id, assign_id, deactivate_id, generate_ids, get_id, list_ids, release_id,
};
use crate::app_state::AppState;

pub fn id_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ids))
        .route("/generate", post(generate_ids))
        .route("/:id", get(get_id))
        .route("/:id/assign", post(assign_id))
        .route("/:id/activate", post(activate_id))
        .route("/:id/deactivate", post(deactivate_id))
        .route("/:id/release", post(release_id))
}
