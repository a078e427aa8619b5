use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_trainee, deactivate_trainee, get_trainee, list_trainees, register_trainee,
    update_trainee,
};
use crate::app_state::AppState;

pub fn trainee_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_trainee).get(list_trainees))
        .route("/:id", get(get_trainee).put(update_trainee))
        .route("/:id/approve", post(approve_trainee))
        .route("/:id/deactivate", post(deactivate_trainee))
}
