//! Document source endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::super::error::ApiError;
use super::super::extract::ApiJson;
use super::super::validation::{
    check_name, check_non_negative, check_range_f64, check_range_i32, normalize_country_code,
    normalize_language_code, normalize_language_codes, Failures,
};
use super::super::AppState;
use crate::models::{NewSource, Source, SourcePatch};

/// Body for creating a source. The source id is chosen by the client and
/// immutable afterwards.
#[derive(Debug, Deserialize)]
pub struct SourceCreateRequest {
    pub source_id: String,
    pub source_name: String,
    pub country_code: Option<String>,
    pub primary_language: Option<String>,
    pub secondary_languages: Option<Vec<String>>,
    pub legal_system: Option<String>,
    pub document_type: Option<String>,
    pub is_active: Option<bool>,
    pub phase: Option<i32>,
}

/// Body for updating source configuration. Absent fields are untouched.
#[derive(Debug, Deserialize)]
pub struct SourceUpdateRequest {
    pub source_name: Option<String>,
    pub is_active: Option<bool>,
    pub phase: Option<i32>,
    pub avg_accuracy: Option<f64>,
    pub avg_cost_per_document: Option<f64>,
}

fn validate_source_create(payload: SourceCreateRequest) -> Result<NewSource, ApiError> {
    let mut failures = Failures::new();

    check_name(&mut failures, "source_id", &payload.source_id, 20);
    check_name(&mut failures, "source_name", &payload.source_name, 200);

    let country_code = normalize_country_code(&mut failures, payload.country_code);
    let primary_language = normalize_language_code(payload.primary_language);
    let secondary_languages = normalize_language_codes(payload.secondary_languages);

    let phase = payload.phase.unwrap_or(1);
    check_range_i32(&mut failures, "phase", phase, 1, 5);

    failures.into_result()?;

    Ok(NewSource {
        source_id: payload.source_id,
        source_name: payload.source_name,
        country_code,
        primary_language,
        secondary_languages,
        legal_system: payload.legal_system,
        document_type: payload.document_type,
        is_active: payload.is_active.unwrap_or(true),
        phase,
    })
}

/// List all document sources.
pub async fn list_sources(State(state): State<AppState>) -> Result<Json<Vec<Source>>, ApiError> {
    Ok(Json(state.sources.get_all().await?))
}

/// Get a document source by ID.
pub async fn get_source(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<Source>, ApiError> {
    match state.sources.get(&source_id).await? {
        Some(source) => Ok(Json(source)),
        None => Err(ApiError::not_found(format!(
            "Source with ID '{}' not found",
            source_id
        ))),
    }
}

/// Create a new document source.
pub async fn create_source(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SourceCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new = validate_source_create(payload)?;

    // Best-effort pre-check; the primary key is the real guard.
    if state.sources.exists(&new.source_id).await? {
        return Err(ApiError::conflict(format!(
            "Source with ID '{}' already exists",
            new.source_id
        )));
    }

    let source = state.sources.create(&new).await?;
    Ok((StatusCode::CREATED, Json(source)))
}

/// Partially update a source's configuration.
pub async fn update_source_config(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    ApiJson(payload): ApiJson<SourceUpdateRequest>,
) -> Result<Json<Source>, ApiError> {
    let mut failures = Failures::new();
    if let Some(name) = &payload.source_name {
        check_name(&mut failures, "source_name", name, 200);
    }
    if let Some(phase) = payload.phase {
        check_range_i32(&mut failures, "phase", phase, 1, 5);
    }
    if let Some(accuracy) = payload.avg_accuracy {
        check_range_f64(&mut failures, "avg_accuracy", accuracy, 0.0, 1.0);
    }
    if let Some(cost) = payload.avg_cost_per_document {
        check_non_negative(&mut failures, "avg_cost_per_document", cost);
    }
    failures.into_result()?;

    let patch = SourcePatch {
        source_name: payload.source_name,
        is_active: payload.is_active,
        phase: payload.phase,
        avg_accuracy: payload.avg_accuracy,
        avg_cost_per_document: payload.avg_cost_per_document,
    };

    match state.sources.update(&source_id, &patch).await? {
        Some(source) => Ok(Json(source)),
        None => Err(ApiError::not_found(format!(
            "Source with ID '{}' not found",
            source_id
        ))),
    }
}
