//! Router configuration for the API server.

use axum::http::HeaderValue;
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::handlers;
use super::request_id;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        // Sources
        .route(
            "/api/v1/sources",
            get(handlers::list_sources).post(handlers::create_source),
        )
        .route("/api/v1/sources/:source_id", get(handlers::get_source))
        .route(
            "/api/v1/sources/:source_id/config",
            put(handlers::update_source_config),
        )
        // Extraction profiles
        .route(
            "/api/v1/sources/:source_id/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        // Field definitions
        .route(
            "/api/v1/sources/:source_id/fields",
            get(handlers::list_fields).post(handlers::create_field),
        )
        .route(
            "/api/v1/fields/:field_id",
            get(handlers::get_field)
                .put(handlers::update_field)
                .delete(handlers::delete_field),
        )
        // Normalization rules
        .route(
            "/api/v1/sources/:source_id/rules",
            get(handlers::list_rules).post(handlers::create_rule),
        )
        .route(
            "/api/v1/rules/:rule_id",
            get(handlers::get_rule).delete(handlers::delete_rule),
        )
        // Prompt templates
        .route(
            "/api/v1/sources/:source_id/templates",
            get(handlers::list_templates).post(handlers::create_template),
        )
        .route(
            "/api/v1/templates/:template_id",
            get(handlers::get_template).delete(handlers::delete_template),
        )
        .layer(axum::middleware::from_fn(request_id::propagate_request_id))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
