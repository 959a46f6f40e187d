//! Extraction profile repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{NewProfileRecord, ProfileChangeset, ProfileRecord};
use super::{now_rfc3339, parse_datetime};
use crate::models::{ExtractionProfile, NewProfile, ProfilePatch};
use crate::schema::source_extraction_profiles as profiles;

/// Convert a database record to a domain model.
impl From<ProfileRecord> for ExtractionProfile {
    fn from(record: ProfileRecord) -> Self {
        ExtractionProfile {
            profile_id: record.profile_id,
            source_id: record.source_id,
            profile_name: record.profile_name,
            is_active: record.is_active,
            is_default: record.is_default,
            pdf_extraction_method: record.pdf_extraction_method,
            ocr_threshold: record.ocr_threshold,
            ocr_language: record.ocr_language,
            use_document_ai_fallback: record.use_document_ai_fallback,
            segmentation_method: record.segmentation_method,
            segment_size_tokens: record.segment_size_tokens,
            segment_overlap_tokens: record.segment_overlap_tokens,
            llm_model_quick: record.llm_model_quick,
            llm_model_detailed: record.llm_model_detailed,
            llm_temperature: record.llm_temperature,
            max_retries: record.max_retries,
            max_cost_per_document: record.max_cost_per_document,
            enable_deep_dive_pass: record.enable_deep_dive_pass,
            deep_dive_confidence_threshold: record.deep_dive_confidence_threshold,
            version: record.version,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Repository for extraction profiles.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: AsyncSqlitePool,
}

impl ProfileRepository {
    /// Create a new profile repository with an existing connection factory.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get a profile by ID.
    pub async fn get(&self, profile_id: &str) -> Result<Option<ExtractionProfile>, DieselError> {
        let mut conn = self.pool.get().await?;

        profiles::table
            .find(profile_id)
            .first::<ProfileRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(ExtractionProfile::from))
    }

    /// List all profiles for a source, oldest first.
    pub async fn list_by_source(
        &self,
        source_id: &str,
    ) -> Result<Vec<ExtractionProfile>, DieselError> {
        let mut conn = self.pool.get().await?;

        profiles::table
            .filter(profiles::source_id.eq(source_id))
            .order((profiles::created_at.asc(), profiles::profile_name.asc()))
            .load::<ProfileRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(ExtractionProfile::from).collect())
    }

    /// Check whether a profile name is taken within a source, optionally
    /// excluding one profile (so renaming to the current name is allowed).
    pub async fn name_exists(
        &self,
        source_id: &str,
        profile_name: &str,
        exclude_profile_id: Option<&str>,
    ) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = profiles::table
            .filter(profiles::source_id.eq(source_id))
            .filter(profiles::profile_name.eq(profile_name))
            .count()
            .into_boxed();
        if let Some(id) = exclude_profile_id {
            query = query.filter(profiles::profile_id.ne(id));
        }

        let count: i64 = query.get_result(&mut conn).await?;
        Ok(count > 0)
    }

    /// Create a new profile for a source.
    pub async fn create(
        &self,
        source_id: &str,
        new: &NewProfile,
    ) -> Result<ExtractionProfile, DieselError> {
        let mut conn = self.pool.get().await?;

        let profile_id = Uuid::new_v4().to_string();
        let now = now_rfc3339();
        let record = NewProfileRecord {
            profile_id: &profile_id,
            source_id,
            profile_name: &new.profile_name,
            is_active: new.is_active,
            is_default: new.is_default,
            pdf_extraction_method: &new.pdf_extraction_method,
            ocr_threshold: new.ocr_threshold,
            ocr_language: new.ocr_language.as_deref(),
            use_document_ai_fallback: new.use_document_ai_fallback,
            segmentation_method: &new.segmentation_method,
            segment_size_tokens: new.segment_size_tokens,
            segment_overlap_tokens: new.segment_overlap_tokens,
            llm_model_quick: &new.llm_model_quick,
            llm_model_detailed: &new.llm_model_detailed,
            llm_temperature: new.llm_temperature,
            max_retries: new.max_retries,
            max_cost_per_document: new.max_cost_per_document,
            enable_deep_dive_pass: new.enable_deep_dive_pass,
            deep_dive_confidence_threshold: new.deep_dive_confidence_threshold,
            version: 1,
            created_at: &now,
            updated_at: &now,
        };

        diesel::insert_into(profiles::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        Ok(ExtractionProfile {
            profile_id,
            source_id: source_id.to_string(),
            profile_name: new.profile_name.clone(),
            is_active: new.is_active,
            is_default: new.is_default,
            pdf_extraction_method: new.pdf_extraction_method.clone(),
            ocr_threshold: new.ocr_threshold,
            ocr_language: new.ocr_language.clone(),
            use_document_ai_fallback: new.use_document_ai_fallback,
            segmentation_method: new.segmentation_method.clone(),
            segment_size_tokens: new.segment_size_tokens,
            segment_overlap_tokens: new.segment_overlap_tokens,
            llm_model_quick: new.llm_model_quick.clone(),
            llm_model_detailed: new.llm_model_detailed.clone(),
            llm_temperature: new.llm_temperature,
            max_retries: new.max_retries,
            max_cost_per_document: new.max_cost_per_document,
            enable_deep_dive_pass: new.enable_deep_dive_pass,
            deep_dive_confidence_threshold: new.deep_dive_confidence_threshold,
            version: 1,
            created_at: parse_datetime(&now),
            updated_at: parse_datetime(&now),
        })
    }

    /// Apply a partial update. Returns the updated profile, or None if the
    /// ID does not resolve.
    pub async fn update(
        &self,
        profile_id: &str,
        patch: &ProfilePatch,
    ) -> Result<Option<ExtractionProfile>, DieselError> {
        let mut conn = self.pool.get().await?;

        let changes = ProfileChangeset {
            profile_name: patch.profile_name.clone(),
            is_active: patch.is_active,
            is_default: patch.is_default,
            pdf_extraction_method: patch.pdf_extraction_method.clone(),
            ocr_threshold: patch.ocr_threshold,
            llm_model_quick: patch.llm_model_quick.clone(),
            llm_model_detailed: patch.llm_model_detailed.clone(),
            llm_temperature: patch.llm_temperature,
            max_cost_per_document: patch.max_cost_per_document,
            updated_at: Some(now_rfc3339()),
        };

        let rows = diesel::update(profiles::table.find(profile_id))
            .set(&changes)
            .execute(&mut conn)
            .await?;

        if rows == 0 {
            return Ok(None);
        }

        profiles::table
            .find(profile_id)
            .first::<ProfileRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(ExtractionProfile::from))
    }

    /// Delete a profile. Returns false if the ID does not resolve.
    pub async fn delete(&self, profile_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(profiles::table.find(profile_id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}
