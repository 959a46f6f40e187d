//! Normalization rule model.
//!
//! A text-cleanup rule applied to extracted content before it is
//! considered final. Rules run in priority order, lower first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalization rule for a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationRule {
    /// Server-generated identifier.
    pub rule_id: String,
    pub source_id: String,
    pub rule_name: String,
    pub rule_type: Option<String>,
    /// Literal text or regex to match, depending on is_regex.
    pub pattern: String,
    pub replacement: Option<String>,
    pub is_regex: bool,
    /// Section names the rule applies to; empty means all sections.
    pub apply_to_sections: Vec<String>,
    /// Lower priority runs first.
    pub priority: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated attributes for creating a normalization rule.
#[derive(Debug, Clone)]
pub struct NewRule {
    pub rule_name: String,
    pub rule_type: Option<String>,
    pub pattern: String,
    pub replacement: Option<String>,
    pub is_regex: bool,
    pub apply_to_sections: Vec<String>,
    pub priority: i32,
    pub is_active: bool,
}

/// Partial update for a normalization rule. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct RulePatch {
    pub rule_name: Option<String>,
    pub rule_type: Option<String>,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
    pub is_regex: Option<bool>,
    pub apply_to_sections: Option<Vec<String>>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
}
