//! Extraction profile endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::super::error::ApiError;
use super::super::extract::ApiJson;
use super::super::validation::{
    check_name, check_non_negative, check_one_decimal, check_range_f64, check_range_i32,
    normalize_language_code, Failures,
};
use super::super::AppState;
use super::require_source;
use crate::models::{ExtractionProfile, NewProfile};

/// Body for creating an extraction profile. Every knob is optional and
/// falls back to the documented default.
#[derive(Debug, Deserialize)]
pub struct ProfileCreateRequest {
    pub profile_name: String,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub pdf_extraction_method: Option<String>,
    pub ocr_threshold: Option<f64>,
    pub ocr_language: Option<String>,
    pub use_document_ai_fallback: Option<bool>,
    pub segmentation_method: Option<String>,
    pub segment_size_tokens: Option<i32>,
    pub segment_overlap_tokens: Option<i32>,
    pub llm_model_quick: Option<String>,
    pub llm_model_detailed: Option<String>,
    pub llm_temperature: Option<f64>,
    pub max_retries: Option<i32>,
    pub max_cost_per_document: Option<f64>,
    pub enable_deep_dive_pass: Option<bool>,
    pub deep_dive_confidence_threshold: Option<f64>,
}

fn validate_profile_create(payload: ProfileCreateRequest) -> Result<NewProfile, ApiError> {
    let defaults = NewProfile::default();
    let mut failures = Failures::new();

    check_name(&mut failures, "profile_name", &payload.profile_name, 100);

    let ocr_threshold = payload.ocr_threshold.unwrap_or(defaults.ocr_threshold);
    check_range_f64(&mut failures, "ocr_threshold", ocr_threshold, 0.0, 1.0);

    let segment_size_tokens = payload
        .segment_size_tokens
        .unwrap_or(defaults.segment_size_tokens);
    check_range_i32(
        &mut failures,
        "segment_size_tokens",
        segment_size_tokens,
        100,
        10000,
    );

    let segment_overlap_tokens = payload
        .segment_overlap_tokens
        .unwrap_or(defaults.segment_overlap_tokens);
    check_range_i32(
        &mut failures,
        "segment_overlap_tokens",
        segment_overlap_tokens,
        0,
        1000,
    );

    let llm_temperature = payload.llm_temperature.unwrap_or(defaults.llm_temperature);
    check_range_f64(&mut failures, "llm_temperature", llm_temperature, 0.0, 2.0);
    check_one_decimal(&mut failures, "llm_temperature", llm_temperature);

    let max_retries = payload.max_retries.unwrap_or(defaults.max_retries);
    check_range_i32(&mut failures, "max_retries", max_retries, 0, 10);

    let max_cost_per_document = payload
        .max_cost_per_document
        .unwrap_or(defaults.max_cost_per_document);
    check_non_negative(&mut failures, "max_cost_per_document", max_cost_per_document);

    let deep_dive_confidence_threshold = payload
        .deep_dive_confidence_threshold
        .unwrap_or(defaults.deep_dive_confidence_threshold);
    check_range_f64(
        &mut failures,
        "deep_dive_confidence_threshold",
        deep_dive_confidence_threshold,
        0.0,
        1.0,
    );

    // Cross-field rule: overlap must be strictly less than segment size,
    // checked after defaulting so partial bodies are covered too.
    if segment_overlap_tokens >= segment_size_tokens {
        let message = format!(
            "segment_overlap_tokens ({}) must be less than segment_size_tokens ({})",
            segment_overlap_tokens, segment_size_tokens
        );
        failures.push("segment_overlap_tokens", message.clone());
        failures.push("segment_size_tokens", message);
    }

    failures.into_result()?;

    Ok(NewProfile {
        profile_name: payload.profile_name,
        is_active: payload.is_active.unwrap_or(defaults.is_active),
        is_default: payload.is_default.unwrap_or(defaults.is_default),
        pdf_extraction_method: payload
            .pdf_extraction_method
            .unwrap_or(defaults.pdf_extraction_method),
        ocr_threshold,
        ocr_language: normalize_language_code(payload.ocr_language),
        use_document_ai_fallback: payload
            .use_document_ai_fallback
            .unwrap_or(defaults.use_document_ai_fallback),
        segmentation_method: payload
            .segmentation_method
            .unwrap_or(defaults.segmentation_method),
        segment_size_tokens,
        segment_overlap_tokens,
        llm_model_quick: payload.llm_model_quick.unwrap_or(defaults.llm_model_quick),
        llm_model_detailed: payload
            .llm_model_detailed
            .unwrap_or(defaults.llm_model_detailed),
        llm_temperature,
        max_retries,
        max_cost_per_document,
        enable_deep_dive_pass: payload
            .enable_deep_dive_pass
            .unwrap_or(defaults.enable_deep_dive_pass),
        deep_dive_confidence_threshold,
    })
}

/// List all extraction profiles for a source.
pub async fn list_profiles(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
) -> Result<Json<Vec<ExtractionProfile>>, ApiError> {
    require_source(&state, &source_id).await?;
    Ok(Json(state.profiles.list_by_source(&source_id).await?))
}

/// Create a new extraction profile for a source.
pub async fn create_profile(
    State(state): State<AppState>,
    Path(source_id): Path<String>,
    ApiJson(payload): ApiJson<ProfileCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_source(&state, &source_id).await?;

    let new = validate_profile_create(payload)?;

    // Best-effort pre-check; the unique index is the real guard.
    if state
        .profiles
        .name_exists(&source_id, &new.profile_name, None)
        .await?
    {
        return Err(ApiError::conflict(format!(
            "Profile with name '{}' already exists for source '{}'",
            new.profile_name, source_id
        )));
    }

    let profile = state.profiles.create(&source_id, &new).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}
