use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_admin, dashboard, get_admin, list_admins, login, update_admin};
use crate::app_state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_admin).get(list_admins))
        .route("/login", post(login))
        .route("/dashboard", get(dashboard))
        .route("/:id", get(get_admin).put(update_admin))
}
