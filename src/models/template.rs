//! Prompt template model.
//!
//! Reusable LLM instruction text associated with a source. Templates are
//! versioned; the (source, name, version) triple is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prompt template for a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Server-generated identifier.
    pub template_id: String,
    pub source_id: String,
    pub template_name: String,
    pub template_type: Option<String>,
    pub language_code: Option<String>,
    pub prompt_text: String,
    /// Placeholder variables the template expects.
    pub variables: Option<serde_json::Value>,
    pub usage_count: i64,
    pub avg_confidence: Option<f64>,
    pub avg_tokens_used: Option<i32>,
    pub is_active: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated attributes for creating a prompt template.
#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub template_name: String,
    pub template_type: Option<String>,
    pub language_code: Option<String>,
    pub prompt_text: String,
    pub variables: Option<serde_json::Value>,
    pub is_active: bool,
    pub version: i32,
}

/// Partial update for a prompt template. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct TemplatePatch {
    pub template_name: Option<String>,
    pub template_type: Option<String>,
    pub language_code: Option<String>,
    pub prompt_text: Option<String>,
    pub variables: Option<serde_json::Value>,
    pub is_active: Option<bool>,
    pub version: Option<i32>,
}
