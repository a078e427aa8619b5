use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_staff, deactivate_staff, get_staff, list_staff, update_staff};
use crate::app_state::AppState;

pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_staff).get(list_staff))
        .route("/:id", get(get_staff).put(update_staff))
        .route("/:id/deactivate", post(deactivate_staff))
}
