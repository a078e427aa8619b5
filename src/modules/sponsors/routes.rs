use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_sponsor, get_sponsor, list_sponsors, update_sponsor};
use crate::app_state::AppState;

pub fn sponsor_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sponsor).get(list_sponsors))
        .route("/:id", get(get_sponsor).put(update_sponsor))
}
