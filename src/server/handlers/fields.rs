//! Field definition endpoints.
//!
//! The richest resource surface: full CRUD plus filtered, paginated
//! listing with an independent total count.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::error::ApiError;
use super::super::extract::ApiJson;
use super::super::validation::{
    check_name, check_range_f64, parse_entity_id, validate_pagination, Failures,
};
use super::super::AppState;
use super::require_source;
use crate::models::{FieldDefinition, FieldPatch, NewField};
use crate::repository::FieldFilters;

/// Query parameters for field listing.
#[derive(Debug, Deserialize)]
pub struct FieldListQuery {
    /// Filter by field category.
    pub category: Option<String>,
    /// Filter by field type.
    pub field_type: Option<String>,
    /// Filter by required status.
    pub is_required: Option<bool>,
    /// Maximum number of results, 1-100.
    pub limit: Option<i64>,
    /// Number of results to skip.
    pub offset: Option<i64>,
}

/// Paginated field listing. `total` reflects the full filtered set, not
/// the returned page.
#[derive(Debug, Serialize)]
pub struct FieldListResponse {
    pub items: Vec<FieldDefinition>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Body for creating a field definition.
#[derive(Debug, Deserialize)]
pub struct FieldCreateRequest {
    pub field_name: String,
    pub field_display_name: Option<String>,
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_section: Option<String>,
    pub regex_pattern: Option<String>,
    pub llm_prompt_template_id: Option<String>,
    pub is_required: Option<bool>,
    pub validation_rules: Option<serde_json::Value>,
    pub confidence_threshold: Option<f64>,
    pub normalization_rules: Option<serde_json::Value>,
    pub display_order: Option<i32>,
}

/// Body for updating a field definition. Absent fields are untouched.
#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub field_name: Option<String>,
    pub field_display_name: Option<String>,
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_section: Option<String>,
    pub regex_pattern: Option<String>,
    pub llm_prompt_template_id: Option<String>,
    pub is_required: Option<bool>,
    pub validation_rules: Option<serde_json::Value>,
    pub confidence_threshold: Option<f64>,
    pub normalization_rules: Option<serde_json::Value>,
    pub display_order: Option<i32>,
}

fn check_template_ref(failures: &mut Failures, value: &Option<String>) {
    if let Some(id) = value {
        if uuid::Uuid::parse_str(id).is_err() {
            failures.push(
                "llm_prompt_template_id",
                format!("llm_prompt_template_id ('{}') must be a UUID", id),
            );
        }
    }
}

fn validate_field_create(payload: FieldCreateRequest) -> Result<NewField, ApiError> {
    let mut failures = Failures::new();

    check_name(&mut failures, "field_name", &payload.field_name, 100);

    let confidence_threshold = payload.confidence_threshold.unwrap_or(0.75);
    check_range_f64(
        &mut failures,
        "confidence_threshold",
        confidence_threshold,
        0.0,
        1.0,
    );
    check_template_ref(&mut failures, &payload.llm_prompt_template_id);

    failures.into_result()?;

    Ok(NewField {
        field_name: payload.field_name,
        field_display_name: payload.field_display_name,
        field_category: payload.field_category,
        field_type: payload.field_type,
        extraction_method: payload.extraction_method,
        extraction_section: payload.extraction_section,
        regex_pattern: payload.regex_pattern,
        llm_prompt_template_id: payload.llm_prompt_template_id,
        is_required: payload.is_required.unwrap_or(false),
        validation_rules: payload.validation_rules,
        confidence_threshold,
        normalization_rules: payload.normalization_rules,
        display_order: payload.display_order,
    })
}

fn validate_field_update(payload: FieldUpdateRequest) -> Result<FieldPatch, ApiError> {
    let mut failures = Failures::new();

    if let Some(name) = &payload.field_name {
        check_name(&mut failures, "field_name", name, 100);
    }
    if let Some(threshold) = payload.confidence_threshold {
        check_range_f64(&mut failures, "confidence_threshold", threshold, 0.0, 1.0);
    }
    check_template_ref(&mut failures, &payload.llm_prompt_template_id);

    failures.into_result()?;

    Ok(FieldPatch {
        field_name: payload.field_name,
        field_display_name: payload.field_display_name,
        field_category: payload.field_category,
        field_type: payload.field_type,
        extraction_method: payload.extraction_method,
        extraction_section: payload.extraction_section,
        regex_pattern: payload.regex_pattern,
        llm_prompt_template_id: payload.llm_prompt_template_id,
        is_required: payload.is_required,
        validation_rules: payload.validation_rules,
        confidence_threshold: payload.confidence_threshold,
        normalization_rules: payload.normalization_rules,
        display_order: payload.display_order,
    })
}

/// List field definitions for a source with optional filtering and
/// pagination.
pub async fn list_fields(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    Query(params): Query<FieldListQuery>,
) -> Result<Json<FieldListResponse>, ApiError> {
    require_source(&state, &source_id).await?;

    let (limit, offset) = validate_pagination(params.limit, params.offset)?;
    let filters = FieldFilters {
        field_category: params.category,
        field_type: params.field_type,
        is_required: params.is_required,
    };

    let items = state
        .fields
        .list_by_source(&source_id, &filters, limit, offset)
        .await?;
    let total = state.fields.count_by_source(&source_id, &filters).await?;

    Ok(Json(FieldListResponse {
        items,
        total,
        limit,
        offset,
    }))
}

/// Create a new field definition for a source.
pub async fn create_field(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    ApiJson(payload): ApiJson<FieldCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_source(&state, &source_id).await?;

    let new = validate_field_create(payload)?;

    // Best-effort pre-check; the unique index is the real guard.
    if state
        .fields
        .name_exists(&source_id, &new.field_name, None)
        .await?
    {
        return Err(ApiError::conflict(format!(
            "Field with name '{}' already exists for source '{}'",
            new.field_name, source_id
        )));
    }

    let field = state.fields.create(&source_id, &new).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

/// Get a field definition by ID.
pub async fn get_field(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> Result<Json<FieldDefinition>, ApiError> {
    parse_entity_id(&field_id)?;

    match state.fields.get(&field_id).await? {
        Some(field) => Ok(Json(field)),
        None => Err(ApiError::not_found(format!(
            "Field with ID '{}' not found",
            field_id
        ))),
    }
}

/// Partially update a field definition.
pub async fn update_field(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    ApiJson(payload): ApiJson<FieldUpdateRequest>,
) -> Result<Json<FieldDefinition>, ApiError> {
    parse_entity_id(&field_id)?;

    let existing = state
        .fields
        .get(&field_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Field with ID '{}' not found", field_id)))?;

    let patch = validate_field_update(payload)?;

    // Renaming runs the duplicate check scoped to the parent source,
    // excluding the field itself so a no-op rename is not a conflict.
    if let Some(new_name) = &patch.field_name {
        if new_name != &existing.field_name
            && state
                .fields
                .name_exists(&existing.source_id, new_name, Some(&field_id))
                .await?
        {
            return Err(ApiError::conflict(format!(
                "Field with name '{}' already exists for source '{}'",
                new_name, existing.source_id
            )));
        }
    }

    match state.fields.update(&field_id, &patch).await? {
        Some(field) => Ok(Json(field)),
        None => Err(ApiError::not_found(format!(
            "Field with ID '{}' not found",
            field_id
        ))),
    }
}

/// Delete a field definition.
pub async fn delete_field(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    parse_entity_id(&field_id)?;

    if state.fields.delete(&field_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Field with ID '{}' not found",
            field_id
        )))
    }
}
