//! Field definition repository.
//!
//! The richest entity surface: listing supports equality filters and
//! pagination, and the total count is computed over the full filtered set
//! independently of the requested page.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{FieldChangeset, FieldRecord, NewFieldRecord};
use super::{decode_json_opt, encode_json_opt, now_rfc3339, parse_datetime};
use crate::models::{FieldDefinition, FieldPatch, NewField};
use crate::schema::source_field_definitions as fields;

/// Optional equality predicates for field listing.
#[derive(Debug, Clone, Default)]
pub struct FieldFilters {
    pub field_category: Option<String>,
    pub field_type: Option<String>,
    pub is_required: Option<bool>,
}

/// Convert a database record to a domain model.
impl From<FieldRecord> for FieldDefinition {
    fn from(record: FieldRecord) -> Self {
        FieldDefinition {
            field_id: record.field_id,
            source_id: record.source_id,
            field_name: record.field_name,
            field_display_name: record.field_display_name,
            field_category: record.field_category,
            field_type: record.field_type,
            extraction_method: record.extraction_method,
            extraction_section: record.extraction_section,
            regex_pattern: record.regex_pattern,
            llm_prompt_template_id: record.llm_prompt_template_id,
            is_required: record.is_required,
            validation_rules: decode_json_opt(record.validation_rules),
            confidence_threshold: record.confidence_threshold,
            normalization_rules: decode_json_opt(record.normalization_rules),
            display_order: record.display_order,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Repository for field definitions.
#[derive(Clone)]
pub struct FieldRepository {
    pool: AsyncSqlitePool,
}

impl FieldRepository {
    /// Create a new field repository with an existing connection factory.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get a field definition by ID.
    pub async fn get(&self, field_id: &str) -> Result<Option<FieldDefinition>, DieselError> {
        let mut conn = self.pool.get().await?;

        fields::table
            .find(field_id)
            .first::<FieldRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(FieldDefinition::from))
    }

    /// List field definitions for a source with optional filtering and
    /// pagination, ordered by display order then name.
    pub async fn list_by_source(
        &self,
        source_id: &str,
        filters: &FieldFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FieldDefinition>, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = fields::table
            .filter(fields::source_id.eq(source_id))
            .into_boxed();
        if let Some(category) = &filters.field_category {
            query = query.filter(fields::field_category.eq(category.clone()));
        }
        if let Some(field_type) = &filters.field_type {
            query = query.filter(fields::field_type.eq(field_type.clone()));
        }
        if let Some(is_required) = filters.is_required {
            query = query.filter(fields::is_required.eq(is_required));
        }

        query
            .order((fields::display_order.asc(), fields::field_name.asc()))
            .limit(limit)
            .offset(offset)
            .load::<FieldRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(FieldDefinition::from).collect())
    }

    /// Count field definitions for a source over the full filtered set.
    pub async fn count_by_source(
        &self,
        source_id: &str,
        filters: &FieldFilters,
    ) -> Result<i64, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = fields::table
            .filter(fields::source_id.eq(source_id))
            .count()
            .into_boxed();
        if let Some(category) = &filters.field_category {
            query = query.filter(fields::field_category.eq(category.clone()));
        }
        if let Some(field_type) = &filters.field_type {
            query = query.filter(fields::field_type.eq(field_type.clone()));
        }
        if let Some(is_required) = filters.is_required {
            query = query.filter(fields::is_required.eq(is_required));
        }

        query.get_result(&mut conn).await
    }

    /// Check whether a field name is taken within a source, optionally
    /// excluding one field (so renaming to the current name is allowed).
    pub async fn name_exists(
        &self,
        source_id: &str,
        field_name: &str,
        exclude_field_id: Option<&str>,
    ) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = fields::table
            .filter(fields::source_id.eq(source_id))
            .filter(fields::field_name.eq(field_name))
            .count()
            .into_boxed();
        if let Some(id) = exclude_field_id {
            query = query.filter(fields::field_id.ne(id));
        }

        let count: i64 = query.get_result(&mut conn).await?;
        Ok(count > 0)
    }

    /// Create a new field definition for a source.
    pub async fn create(
        &self,
        source_id: &str,
        new: &NewField,
    ) -> Result<FieldDefinition, DieselError> {
        let mut conn = self.pool.get().await?;

        let field_id = Uuid::new_v4().to_string();
        let now = now_rfc3339();
        let validation_rules = encode_json_opt(&new.validation_rules);
        let normalization_rules = encode_json_opt(&new.normalization_rules);
        let record = NewFieldRecord {
            field_id: &field_id,
            source_id,
            field_name: &new.field_name,
            field_display_name: new.field_display_name.as_deref(),
            field_category: new.field_category.as_deref(),
            field_type: new.field_type.as_deref(),
            extraction_method: new.extraction_method.as_deref(),
            extraction_section: new.extraction_section.as_deref(),
            regex_pattern: new.regex_pattern.as_deref(),
            llm_prompt_template_id: new.llm_prompt_template_id.as_deref(),
            is_required: new.is_required,
            validation_rules: validation_rules.as_deref(),
            confidence_threshold: new.confidence_threshold,
            normalization_rules: normalization_rules.as_deref(),
            display_order: new.display_order,
            created_at: &now,
            updated_at: &now,
        };

        diesel::insert_into(fields::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        Ok(FieldDefinition {
            field_id,
            source_id: source_id.to_string(),
            field_name: new.field_name.clone(),
            field_display_name: new.field_display_name.clone(),
            field_category: new.field_category.clone(),
            field_type: new.field_type.clone(),
            extraction_method: new.extraction_method.clone(),
            extraction_section: new.extraction_section.clone(),
            regex_pattern: new.regex_pattern.clone(),
            llm_prompt_template_id: new.llm_prompt_template_id.clone(),
            is_required: new.is_required,
            validation_rules: new.validation_rules.clone(),
            confidence_threshold: new.confidence_threshold,
            normalization_rules: new.normalization_rules.clone(),
            display_order: new.display_order,
            created_at: parse_datetime(&now),
            updated_at: parse_datetime(&now),
        })
    }

    /// Apply a partial update. Returns the updated field, or None if the
    /// ID does not resolve.
    pub async fn update(
        &self,
        field_id: &str,
        patch: &FieldPatch,
    ) -> Result<Option<FieldDefinition>, DieselError> {
        let mut conn = self.pool.get().await?;

        let changes = FieldChangeset {
            field_name: patch.field_name.clone(),
            field_display_name: patch.field_display_name.clone(),
            field_category: patch.field_category.clone(),
            field_type: patch.field_type.clone(),
            extraction_method: patch.extraction_method.clone(),
            extraction_section: patch.extraction_section.clone(),
            regex_pattern: patch.regex_pattern.clone(),
            llm_prompt_template_id: patch.llm_prompt_template_id.clone(),
            is_required: patch.is_required,
            validation_rules: encode_json_opt(&patch.validation_rules),
            confidence_threshold: patch.confidence_threshold,
            normalization_rules: encode_json_opt(&patch.normalization_rules),
            display_order: patch.display_order,
            updated_at: Some(now_rfc3339()),
        };

        let rows = diesel::update(fields::table.find(field_id))
            .set(&changes)
            .execute(&mut conn)
            .await?;

        if rows == 0 {
            return Ok(None);
        }

        fields::table
            .find(field_id)
            .first::<FieldRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(FieldDefinition::from))
    }

    /// Delete a field definition. Returns false if the ID does not resolve.
    pub async fn delete(&self, field_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(fields::table.find(field_id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}
