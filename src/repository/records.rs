//! Diesel ORM record types for the configuration tables.
//!
//! Records mirror the committed schema: JSON-valued columns are stored as
//! TEXT, timestamps as RFC 3339 TEXT. Conversion to and from the domain
//! models lives next to each repository.

use diesel::prelude::*;

use crate::schema;

/// Document source record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::document_sources)]
#[diesel(primary_key(source_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SourceRecord {
    pub source_id: String,
    pub source_name: String,
    pub country_code: Option<String>,
    pub primary_language: Option<String>,
    pub secondary_languages: String,
    pub legal_system: Option<String>,
    pub document_type: Option<String>,
    pub is_active: bool,
    pub phase: i32,
    pub total_documents_processed: i64,
    pub avg_accuracy: Option<f64>,
    pub avg_cost_per_document: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// New document source for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::document_sources)]
pub struct NewSourceRecord<'a> {
    pub source_id: &'a str,
    pub source_name: &'a str,
    pub country_code: Option<&'a str>,
    pub primary_language: Option<&'a str>,
    pub secondary_languages: &'a str,
    pub legal_system: Option<&'a str>,
    pub document_type: Option<&'a str>,
    pub is_active: bool,
    pub phase: i32,
    pub total_documents_processed: i64,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial source update. Absent fields are left untouched.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::document_sources)]
pub struct SourceChangeset {
    pub source_name: Option<String>,
    pub is_active: Option<bool>,
    pub phase: Option<i32>,
    pub avg_accuracy: Option<f64>,
    pub avg_cost_per_document: Option<f64>,
    pub updated_at: Option<String>,
}

/// Extraction profile record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::source_extraction_profiles)]
#[diesel(primary_key(profile_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileRecord {
    pub profile_id: String,
    pub source_id: String,
    pub profile_name: String,
    pub is_active: bool,
    pub is_default: bool,
    pub pdf_extraction_method: String,
    pub ocr_threshold: f64,
    pub ocr_language: Option<String>,
    pub use_document_ai_fallback: bool,
    pub segmentation_method: String,
    pub segment_size_tokens: i32,
    pub segment_overlap_tokens: i32,
    pub llm_model_quick: String,
    pub llm_model_detailed: String,
    pub llm_temperature: f64,
    pub max_retries: i32,
    pub max_cost_per_document: f64,
    pub enable_deep_dive_pass: bool,
    pub deep_dive_confidence_threshold: f64,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// New extraction profile for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::source_extraction_profiles)]
pub struct NewProfileRecord<'a> {
    pub profile_id: &'a str,
    pub source_id: &'a str,
    pub profile_name: &'a str,
    pub is_active: bool,
    pub is_default: bool,
    pub pdf_extraction_method: &'a str,
    pub ocr_threshold: f64,
    pub ocr_language: Option<&'a str>,
    pub use_document_ai_fallback: bool,
    pub segmentation_method: &'a str,
    pub segment_size_tokens: i32,
    pub segment_overlap_tokens: i32,
    pub llm_model_quick: &'a str,
    pub llm_model_detailed: &'a str,
    pub llm_temperature: f64,
    pub max_retries: i32,
    pub max_cost_per_document: f64,
    pub enable_deep_dive_pass: bool,
    pub deep_dive_confidence_threshold: f64,
    pub version: i32,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::source_extraction_profiles)]
pub struct ProfileChangeset {
    pub profile_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub pdf_extraction_method: Option<String>,
    pub ocr_threshold: Option<f64>,
    pub llm_model_quick: Option<String>,
    pub llm_model_detailed: Option<String>,
    pub llm_temperature: Option<f64>,
    pub max_cost_per_document: Option<f64>,
    pub updated_at: Option<String>,
}

/// Field definition record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::source_field_definitions)]
#[diesel(primary_key(field_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FieldRecord {
    pub field_id: String,
    pub source_id: String,
    pub field_name: String,
    pub field_display_name: Option<String>,
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_section: Option<String>,
    pub regex_pattern: Option<String>,
    pub llm_prompt_template_id: Option<String>,
    pub is_required: bool,
    pub validation_rules: Option<String>,
    pub confidence_threshold: f64,
    pub normalization_rules: Option<String>,
    pub display_order: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

/// New field definition for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::source_field_definitions)]
pub struct NewFieldRecord<'a> {
    pub field_id: &'a str,
    pub source_id: &'a str,
    pub field_name: &'a str,
    pub field_display_name: Option<&'a str>,
    pub field_category: Option<&'a str>,
    pub field_type: Option<&'a str>,
    pub extraction_method: Option<&'a str>,
    pub extraction_section: Option<&'a str>,
    pub regex_pattern: Option<&'a str>,
    pub llm_prompt_template_id: Option<&'a str>,
    pub is_required: bool,
    pub validation_rules: Option<&'a str>,
    pub confidence_threshold: f64,
    pub normalization_rules: Option<&'a str>,
    pub display_order: Option<i32>,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial field update. Absent fields are left untouched.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::source_field_definitions)]
pub struct FieldChangeset {
    pub field_name: Option<String>,
    pub field_display_name: Option<String>,
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub extraction_method: Option<String>,
    pub extraction_section: Option<String>,
    pub regex_pattern: Option<String>,
    pub llm_prompt_template_id: Option<String>,
    pub is_required: Option<bool>,
    pub validation_rules: Option<String>,
    pub confidence_threshold: Option<f64>,
    pub normalization_rules: Option<String>,
    pub display_order: Option<i32>,
    pub updated_at: Option<String>,
}

/// Normalization rule record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::source_normalization_rules)]
#[diesel(primary_key(rule_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RuleRecord {
    pub rule_id: String,
    pub source_id: String,
    pub rule_name: String,
    pub rule_type: Option<String>,
    pub pattern: String,
    pub replacement: Option<String>,
    pub is_regex: bool,
    pub apply_to_sections: String,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// New normalization rule for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::source_normalization_rules)]
pub struct NewRuleRecord<'a> {
    pub rule_id: &'a str,
    pub source_id: &'a str,
    pub rule_name: &'a str,
    pub rule_type: Option<&'a str>,
    pub pattern: &'a str,
    pub replacement: Option<&'a str>,
    pub is_regex: bool,
    pub apply_to_sections: &'a str,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial rule update. Absent fields are left untouched.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::source_normalization_rules)]
pub struct RuleChangeset {
    pub rule_name: Option<String>,
    pub rule_type: Option<String>,
    pub pattern: Option<String>,
    pub replacement: Option<String>,
    pub is_regex: Option<bool>,
    pub apply_to_sections: Option<String>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
    pub updated_at: Option<String>,
}

/// Prompt template record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::source_prompt_templates)]
#[diesel(primary_key(template_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TemplateRecord {
    pub template_id: String,
    pub source_id: String,
    pub template_name: String,
    pub template_type: Option<String>,
    pub language_code: Option<String>,
    pub prompt_text: String,
    pub variables: Option<String>,
    pub usage_count: i64,
    pub avg_confidence: Option<f64>,
    pub avg_tokens_used: Option<i32>,
    pub is_active: bool,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// New prompt template for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::source_prompt_templates)]
pub struct NewTemplateRecord<'a> {
    pub template_id: &'a str,
    pub source_id: &'a str,
    pub template_name: &'a str,
    pub template_type: Option<&'a str>,
    pub language_code: Option<&'a str>,
    pub prompt_text: &'a str,
    pub variables: Option<&'a str>,
    pub usage_count: i64,
    pub is_active: bool,
    pub version: i32,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial template update. Absent fields are left untouched.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::source_prompt_templates)]
pub struct TemplateChangeset {
    pub template_name: Option<String>,
    pub template_type: Option<String>,
    pub language_code: Option<String>,
    pub prompt_text: Option<String>,
    pub variables: Option<String>,
    pub is_active: Option<bool>,
    pub version: Option<i32>,
    pub updated_at: Option<String>,
}
