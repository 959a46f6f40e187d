//! Extraction profile model.
//!
//! A named bundle of processing parameters (OCR, segmentation, model
//! choice, cost and retry limits) for one source. Profile names are
//! unique per source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An extraction profile for a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionProfile {
    /// Server-generated identifier.
    pub profile_id: String,
    pub source_id: String,
    pub profile_name: String,
    pub is_active: bool,
    pub is_default: bool,
    pub pdf_extraction_method: String,
    /// OCR quality threshold, 0.00-1.00.
    pub ocr_threshold: f64,
    pub ocr_language: Option<String>,
    pub use_document_ai_fallback: bool,
    pub segmentation_method: String,
    /// Segment size in tokens, 100-10000.
    pub segment_size_tokens: i32,
    /// Segment overlap in tokens, 0-1000. Always strictly less than
    /// segment_size_tokens.
    pub segment_overlap_tokens: i32,
    pub llm_model_quick: String,
    pub llm_model_detailed: String,
    /// LLM sampling temperature, 0.0-2.0 in steps of 0.1.
    pub llm_temperature: f64,
    pub max_retries: i32,
    pub max_cost_per_document: f64,
    pub enable_deep_dive_pass: bool,
    pub deep_dive_confidence_threshold: f64,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated attributes for creating a profile, with defaults applied.
#[derive(Debug, Clone)]
pub struct NewProfile {
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
}

impl Default for NewProfile {
    fn default() -> Self {
        Self {
            profile_name: String::new(),
            is_active: true,
            is_default: false,
            pdf_extraction_method: "pdfplumber".to_string(),
            ocr_threshold: 0.80,
            ocr_language: None,
            use_document_ai_fallback: true,
            segmentation_method: "section_based".to_string(),
            segment_size_tokens: 3000,
            segment_overlap_tokens: 200,
            llm_model_quick: "gemini-1.5-flash".to_string(),
            llm_model_detailed: "gemini-1.5-pro".to_string(),
            llm_temperature: 0.1,
            max_retries: 2,
            max_cost_per_document: 2.00,
            enable_deep_dive_pass: true,
            deep_dive_confidence_threshold: 0.75,
        }
    }
}

/// Partial update for a profile. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub profile_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
    pub pdf_extraction_method: Option<String>,
    pub ocr_threshold: Option<f64>,
    pub llm_model_quick: Option<String>,
    pub llm_model_detailed: Option<String>,
    pub llm_temperature: Option<f64>,
    pub max_cost_per_document: Option<f64>,
}
