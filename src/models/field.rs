//! Field definition model.
//!
//! Specifies one piece of data to extract from a document: how it is
//! extracted, validated, normalized, and with what confidence bar. Field
//! names are unique per source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A field definition for a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Server-generated identifier.
    pub field_id: String,
    pub source_id: String,
    /// Internal identifier form (e.g. "case_number").
    pub field_name: String,
    pub field_display_name: Option<String>,
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_section: Option<String>,
    pub regex_pattern: Option<String>,
    /// Prompt template reference; not enforced at the storage level.
    pub llm_prompt_template_id: Option<String>,
    pub is_required: bool,
    pub validation_rules: Option<serde_json::Value>,
    /// Minimum extraction confidence, 0.00-1.00.
    pub confidence_threshold: f64,
    pub normalization_rules: Option<serde_json::Value>,
    pub display_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated attributes for creating a field definition.
#[derive(Debug, Clone)]
pub struct NewField {
    pub field_name: String,
    pub field_display_name: Option<String>,
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_section: Option<String>,
    pub regex_pattern: Option<String>,
    pub llm_prompt_template_id: Option<String>,
    pub is_required: bool,
    pub validation_rules: Option<serde_json::Value>,
    pub confidence_threshold: f64,
    pub normalization_rules: Option<serde_json::Value>,
    pub display_order: Option<i32>,
}

/// Partial update for a field definition. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
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
