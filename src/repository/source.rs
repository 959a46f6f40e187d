//! Document source repository.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{NewSourceRecord, SourceChangeset, SourceRecord};
use super::{decode_string_list, encode_string_list, now_rfc3339, parse_datetime};
use crate::models::{NewSource, Source, SourcePatch};
use crate::schema::{
    document_sources, source_extraction_profiles, source_field_definitions,
    source_normalization_rules, source_prompt_templates,
};

/// Convert a database record to a domain model.
impl From<SourceRecord> for Source {
    fn from(record: SourceRecord) -> Self {
        Source {
            source_id: record.source_id,
            source_name: record.source_name,
            country_code: record.country_code,
            primary_language: record.primary_language,
            secondary_languages: decode_string_list(&record.secondary_languages),
            legal_system: record.legal_system,
            document_type: record.document_type,
            is_active: record.is_active,
            phase: record.phase,
            total_documents_processed: record.total_documents_processed,
            avg_accuracy: record.avg_accuracy,
            avg_cost_per_document: record.avg_cost_per_document,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Repository for document sources.
#[derive(Clone)]
pub struct SourceRepository {
    pool: AsyncSqlitePool,
}

impl SourceRepository {
    /// Create a new source repository with an existing connection factory.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get a source by ID.
    pub async fn get(&self, source_id: &str) -> Result<Option<Source>, DieselError> {
        let mut conn = self.pool.get().await?;

        document_sources::table
            .find(source_id)
            .first::<SourceRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Source::from))
    }

    /// Get all sources, ordered by ID.
    pub async fn get_all(&self) -> Result<Vec<Source>, DieselError> {
        let mut conn = self.pool.get().await?;

        document_sources::table
            .order(document_sources::source_id.asc())
            .load::<SourceRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Source::from).collect())
    }

    /// Check if a source exists.
    pub async fn exists(&self, source_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let count: i64 = document_sources::table
            .filter(document_sources::source_id.eq(source_id))
            .count()
            .get_result(&mut conn)
            .await?;

        Ok(count > 0)
    }

    /// Create a new source.
    ///
    /// The unique primary key is the authoritative duplicate guard; a
    /// same-id insert surfaces as a `UniqueViolation` database error.
    pub async fn create(&self, new: &NewSource) -> Result<Source, DieselError> {
        let mut conn = self.pool.get().await?;

        let now = now_rfc3339();
        let languages = encode_string_list(&new.secondary_languages);
        let record = NewSourceRecord {
            source_id: &new.source_id,
            source_name: &new.source_name,
            country_code: new.country_code.as_deref(),
            primary_language: new.primary_language.as_deref(),
            secondary_languages: &languages,
            legal_system: new.legal_system.as_deref(),
            document_type: new.document_type.as_deref(),
            is_active: new.is_active,
            phase: new.phase,
            total_documents_processed: 0,
            created_at: &now,
            updated_at: &now,
        };

        diesel::insert_into(document_sources::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        Ok(Source {
            source_id: new.source_id.clone(),
            source_name: new.source_name.clone(),
            country_code: new.country_code.clone(),
            primary_language: new.primary_language.clone(),
            secondary_languages: new.secondary_languages.clone(),
            legal_system: new.legal_system.clone(),
            document_type: new.document_type.clone(),
            is_active: new.is_active,
            phase: new.phase,
            total_documents_processed: 0,
            avg_accuracy: None,
            avg_cost_per_document: None,
            created_at: parse_datetime(&now),
            updated_at: parse_datetime(&now),
        })
    }

    /// Apply a partial update. Returns the updated source, or None if the
    /// ID does not resolve.
    pub async fn update(
        &self,
        source_id: &str,
        patch: &SourcePatch,
    ) -> Result<Option<Source>, DieselError> {
        let mut conn = self.pool.get().await?;

        let changes = SourceChangeset {
            source_name: patch.source_name.clone(),
            is_active: patch.is_active,
            phase: patch.phase,
            avg_accuracy: patch.avg_accuracy,
            avg_cost_per_document: patch.avg_cost_per_document,
            updated_at: Some(now_rfc3339()),
        };

        let rows = diesel::update(document_sources::table.find(source_id))
            .set(&changes)
            .execute(&mut conn)
            .await?;

        if rows == 0 {
            return Ok(None);
        }

        document_sources::table
            .find(source_id)
            .first::<SourceRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Source::from))
    }

    /// Delete a source and all of its child configuration in one
    /// transaction. Returns false if the ID does not resolve.
    pub async fn delete(&self, source_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;
        let id = source_id.to_string();

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                diesel::delete(
                    source_field_definitions::table
                        .filter(source_field_definitions::source_id.eq(&id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(
                    source_extraction_profiles::table
                        .filter(source_extraction_profiles::source_id.eq(&id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(
                    source_normalization_rules::table
                        .filter(source_normalization_rules::source_id.eq(&id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(
                    source_prompt_templates::table
                        .filter(source_prompt_templates::source_id.eq(&id)),
                )
                .execute(conn)
                .await?;

                let rows = diesel::delete(document_sources::table.find(&id))
                    .execute(conn)
                    .await?;
                Ok(rows > 0)
            }
            .scope_boxed()
        })
        .await
    }
}
