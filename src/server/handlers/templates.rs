//! Prompt template endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::super::error::ApiError;
use super::super::extract::ApiJson;
use super::super::validation::{check_name, normalize_language_code, parse_entity_id, Failures};
use super::super::AppState;
use super::require_source;
use crate::models::{NewTemplate, PromptTemplate};

/// Body for creating a prompt template.
#[derive(Debug, Deserialize)]
pub struct TemplateCreateRequest {
    pub template_name: String,
    pub template_type: Option<String>,
    pub language_code: Option<String>,
    pub prompt_text: String,
    pub variables: Option<serde_json::Value>,
    pub is_active: Option<bool>,
    pub version: Option<i32>,
}

fn validate_template_create(payload: TemplateCreateRequest) -> Result<NewTemplate, ApiError> {
    let mut failures = Failures::new();

    check_name(&mut failures, "template_name", &payload.template_name, 100);
    if payload.prompt_text.trim().is_empty() {
        failures.push("prompt_text", "prompt_text must not be empty");
    }

    let version = payload.version.unwrap_or(1);
    if version < 1 {
        failures.push("version", format!("version ({}) must be at least 1", version));
    }

    failures.into_result()?;

    Ok(NewTemplate {
        template_name: payload.template_name,
        template_type: payload.template_type,
        language_code: normalize_language_code(payload.language_code),
        prompt_text: payload.prompt_text,
        variables: payload.variables,
        is_active: payload.is_active.unwrap_or(true),
        version,
    })
}

/// List prompt templates for a source.
pub async fn list_templates(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<Vec<PromptTemplate>>, ApiError> {
    require_source(&state, &source_id).await?;
    Ok(Json(state.templates.list_by_source(&source_id).await?))
}

/// Create a new prompt template for a source.
pub async fn create_template(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    ApiJson(payload): ApiJson<TemplateCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_source(&state, &source_id).await?;

    let new = validate_template_create(payload)?;

    // Best-effort pre-check; the unique index is the real guard.
    if state
        .templates
        .name_version_exists(&source_id, &new.template_name, new.version, None)
        .await?
    {
        return Err(ApiError::conflict(format!(
            "Template with name '{}' and version {} already exists for source '{}'",
            new.template_name, new.version, source_id
        )));
    }

    let template = state.templates.create(&source_id, &new).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Get a prompt template by ID.
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<Json<PromptTemplate>, ApiError> {
    parse_entity_id(&template_id)?;

    match state.templates.get(&template_id).await? {
        Some(template) => Ok(Json(template)),
        None => Err(ApiError::not_found(format!(
            "Template with ID '{}' not found",
            template_id
        ))),
    }
}

/// Delete a prompt template.
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    parse_entity_id(&template_id)?;

    if state.templates.delete(&template_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Template with ID '{}' not found",
            template_id
        )))
    }
}
