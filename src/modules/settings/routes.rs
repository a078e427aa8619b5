use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_setting, get_setting, list_settings, upsert_setting};
use crate::app_state::AppState;

pub fn setting_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_setting).get(list_settings))
        .route("/:key", get(get_setting).put(upsert_setting))
}
