//! Normalization rule endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::super::error::ApiError;
use super::super::extract::ApiJson;
use super::super::validation::{check_name, parse_entity_id, Failures};
use super::super::AppState;
use super::require_source;
use crate::models::{NewRule, NormalizationRule};

/// Query parameters for rule listing.
#[derive(Debug, Deserialize)]
pub struct RuleListQuery {
    /// When true, only active rules are returned.
    pub active: Option<bool>,
}

/// Body for creating a normalization rule.
#[derive(Debug, Deserialize)]
pub struct RuleCreateRequest {
    pub rule_name: String,
    pub rule_type: Option<String>,
    pub pattern: String,
    pub replacement: Option<String>,
    pub is_regex: Option<bool>,
    pub apply_to_sections: Option<Vec<String>>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
}

fn validate_rule_create(payload: RuleCreateRequest) -> Result<NewRule, ApiError> {
    let mut failures = Failures::new();

    check_name(&mut failures, "rule_name", &payload.rule_name, 100);
    if payload.pattern.is_empty() {
        failures.push("pattern", "pattern must not be empty");
    }

    failures.into_result()?;

    Ok(NewRule {
        rule_name: payload.rule_name,
        rule_type: payload.rule_type,
        pattern: payload.pattern,
        replacement: payload.replacement,
        is_regex: payload.is_regex.unwrap_or(false),
        apply_to_sections: payload.apply_to_sections.unwrap_or_default(),
        priority: payload.priority.unwrap_or(100),
        is_active: payload.is_active.unwrap_or(true),
    })
}

/// List normalization rules for a source in application order.
pub async fn list_rules(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    Query(params): Query<RuleListQuery>,
) -> Result<Json<Vec<NormalizationRule>>, ApiError> {
    require_source(&state, &source_id).await?;
    Ok(Json(
        state
            .rules
            .list_by_source(&source_id, params.active.unwrap_or(false))
            .await?,
    ))
}

/// Create a new normalization rule for a source.
pub async fn create_rule(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    ApiJson(payload): ApiJson<RuleCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_source(&state, &source_id).await?;

    let new = validate_rule_create(payload)?;
    let rule = state.rules.create(&source_id, &new).await?;
    Ok((StatusCode::CREATED, Json(rule)))
}

/// Get a normalization rule by ID.
pub async fn get_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<Json<NormalizationRule>, ApiError> {
    parse_entity_id(&rule_id)?;

    match state.rules.get(&rule_id).await? {
        Some(rule) => Ok(Json(rule)),
        None => Err(ApiError::not_found(format!(
            "Rule with ID '{}' not found",
            rule_id
        ))),
    }
}

/// Delete a normalization rule.
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    parse_entity_id(&rule_id)?;

    if state.rules.delete(&rule_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Rule with ID '{}' not found",
            rule_id
        )))
    }
}
