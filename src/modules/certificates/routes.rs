use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_certificate, issue_certificate, list_certificates, revoke_certificate, verify_certificate,
};
use crate::app_state::AppState;

pub fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(issue_certificate).get(list_certificates))
        .route("/verify/:serial", get(verify_certificate))
        .route("/:id", get(get_certificate))
        .route("/:id/revoke", post(revoke_certificate))
}
