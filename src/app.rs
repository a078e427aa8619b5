use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{
    app_state::AppState,
    config,
    middleware::request_log_middleware,
    modules::{
        admin::routes::admin_routes,
        announcements::routes::announcement_routes,
        certificates::routes::certificate_routes,
        content::routes::{file_routes, video_routes},
        exams::routes::{exam_routes, trainee_attempt_routes},
        ids::routes::id_routes,
        messages::routes::message_routes,
        resource_persons::routes::resource_person_routes,
        settings::routes::setting_routes,
        sponsors::routes::sponsor_routes,
        staff::routes::staff_routes,
        trainees::routes::trainee_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.env);

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/api/admin", admin_routes())
        .nest("/api/sponsors", sponsor_routes())
        .nest(
            "/api/trainees",
            trainee_routes().merge(trainee_attempt_routes()),
        )
        .nest("/api/staff", staff_routes())
        .nest("/api/resource-persons", resource_person_routes())
        .nest("/api/ids", id_routes())
        .nest("/api/exams", exam_routes())
        .nest("/api/videos", video_routes())
        .nest("/api/files", file_routes())
        .nest("/api/announcements", announcement_routes())
        .nest("/api/messages", message_routes())
        .nest("/api/certificates", certificate_routes())
        .nest("/api/settings", setting_routes())
        .layer(cors)
        .layer(middleware::from_fn(request_log_middleware))
        .with_state(state)
}

fn cors_layer(config: &config::Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    // No configured origin means a same-origin deployment: no allow-origin
    // header is emitted at all.
    let Some(origin) = config.app.cors_allowed_origin.as_deref() else {
        return base;
    };

    match parse_allow_origin(origin) {
        Some(allow_origin) => base.allow_origin(allow_origin),
        None => {
            tracing::warn!(origin, "invalid CORS origin, cross-origin requests stay blocked");
            base
        }
    }
}

/// `"*"` opens the API to any origin; anything else must parse as an exact
/// header value. An unparseable value grants nothing.
fn parse_allow_origin(origin: &str) -> Option<AllowOrigin> {
    if origin == "*" {
        return Some(AllowOrigin::any());
    }
    HeaderValue::from_str(origin).ok().map(AllowOrigin::exact)
}

async fn hello() -> &'static str {
    "Training portal backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": "ok",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_origin_is_accepted() {
        assert!(parse_allow_origin("*").is_some());
    }

    #[test]
    fn exact_origin_is_accepted() {
        assert!(parse_allow_origin("http://localhost:3000").is_some());
    }

    #[test]
    fn garbage_origin_grants_nothing() {
        assert!(parse_allow_origin("http://bad\norigin").is_none());
    }
}
