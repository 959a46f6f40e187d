//! Document source model.
//!
//! A source is a document-producing origin (e.g. a court) whose documents
//! are processed under a shared configuration namespace. The source id is
//! a short opaque string chosen by the client at creation time and is the
//! foreign-key target for every child configuration entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured document source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Short stable identifier, immutable once created.
    pub source_id: String,
    /// Display name.
    pub source_name: String,
    /// ISO 3166-1 alpha-3 country code, stored upper-case.
    pub country_code: Option<String>,
    /// Primary language code, stored lower-case.
    pub primary_language: Option<String>,
    /// Ordered secondary language codes, stored lower-case.
    pub secondary_languages: Vec<String>,
    /// Legal system type (e.g. "civil_law").
    pub legal_system: Option<String>,
    /// Kind of documents this source produces.
    pub document_type: Option<String>,
    /// Whether the source is active.
    pub is_active: bool,
    /// Development phase, 1-5.
    pub phase: i32,
    /// Monotonically increasing processed-document counter.
    pub total_documents_processed: i64,
    /// Average extraction accuracy, 0.00-1.00.
    pub avg_accuracy: Option<f64>,
    /// Average processing cost per document.
    pub avg_cost_per_document: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated attributes for creating a source.
///
/// Country and language codes are already case-normalized by the
/// validation layer before this struct is constructed.
#[derive(Debug, Clone)]
pub struct NewSource {
    pub source_id: String,
    pub source_name: String,
    pub country_code: Option<String>,
    pub primary_language: Option<String>,
    pub secondary_languages: Vec<String>,
    pub legal_system: Option<String>,
    pub document_type: Option<String>,
    pub is_active: bool,
    pub phase: i32,
}

/// Partial update for a source. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct SourcePatch {
    pub source_name: Option<String>,
    pub is_active: Option<bool>,
    pub phase: Option<i32>,
    pub avg_accuracy: Option<f64>,
    pub avg_cost_per_document: Option<f64>,
}

impl SourcePatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.source_name.is_none()
            && self.is_active.is_none()
            && self.phase.is_none()
            && self.avg_accuracy.is_none()
            && self.avg_cost_per_document.is_none()
    }
}
