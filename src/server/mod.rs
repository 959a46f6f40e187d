//! REST API server for configuration management.
//!
//! Exposes the per-source configuration store over a versioned HTTP
//! surface: sources, extraction profiles, field definitions,
//! normalization rules, and prompt templates.

mod error;
mod extract;
mod handlers;
mod request_id;
mod routes;
mod validation;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::{
    DbContext, FieldRepository, ProfileRepository, RuleRepository, SourceRepository,
    TemplateRepository,
};

/// Shared state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub ctx: DbContext,
    pub sources: Arc<SourceRepository>,
    pub profiles: Arc<ProfileRepository>,
    pub fields: Arc<FieldRepository>,
    pub rules: Arc<RuleRepository>,
    pub templates: Arc<TemplateRepository>,
}

impl AppState {
    /// Build state from an existing database context.
    pub fn from_context(ctx: DbContext) -> Self {
        Self {
            sources: Arc::new(ctx.sources()),
            profiles: Arc::new(ctx.profiles()),
            fields: Arc::new(ctx.fields()),
            rules: Arc::new(ctx.rules()),
            templates: Arc::new(ctx.templates()),
            ctx,
        }
    }

    /// Build state from settings.
    pub fn new(settings: &Settings) -> Self {
        Self::from_context(settings.create_db_context())
    }
}

/// Start the API server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state, &settings.allowed_origins);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    async fn setup_test_app() -> (axum::Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db_url = db_path.display().to_string();

        crate::repository::migrate::run_migrations(&db_url)
            .await
            .unwrap();

        let ctx = DbContext::from_url(&db_url);
        let app = create_router(AppState::from_context(ctx), &[]);
        (app, dir)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_reports_database() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["checks"]["database"], "ok");
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "test-correlation-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "test-correlation-id"
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_request_id() {
        let (app, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/sources/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NotFound");
        assert!(json["request_id"].is_string());
    }
}
