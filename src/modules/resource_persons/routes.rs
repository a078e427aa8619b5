use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_resource_person, deactivate_resource_person, get_resource_person,
    list_resource_persons, update_resource_person,
};
use crate::app_state::AppState;

pub fn resource_person_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_resource_person).get(list_resource_persons))
        .route("/:id", get(get_resource_person).put(update_resource_person))
        .route("/:id/deactivate", post(deactivate_resource_person))
}
