//! Prompt template repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{NewTemplateRecord, TemplateChangeset, TemplateRecord};
use super::{decode_json_opt, encode_json_opt, now_rfc3339, parse_datetime};
use crate::models::{NewTemplate, PromptTemplate, TemplatePatch};
use crate::schema::source_prompt_templates as templates;

/// Convert a database record to a domain model.
impl From<TemplateRecord> for PromptTemplate {
    fn from(record: TemplateRecord) -> Self {
        PromptTemplate {
            template_id: record.template_id,
            source_id: record.source_id,
            template_name: record.template_name,
            template_type: record.template_type,
            language_code: record.language_code,
            prompt_text: record.prompt_text,
            variables: decode_json_opt(record.variables),
            usage_count: record.usage_count,
            avg_confidence: record.avg_confidence,
            avg_tokens_used: record.avg_tokens_used,
            is_active: record.is_active,
            version: record.version,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Repository for prompt templates.
#[derive(Clone)]
pub struct TemplateRepository {
    pool: AsyncSqlitePool,
}

impl TemplateRepository {
    /// Create a new template repository with an existing connection factory.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get a template by ID.
    pub async fn get(&self, template_id: &str) -> Result<Option<PromptTemplate>, DieselError> {
        let mut conn = self.pool.get().await?;

        templates::table
            .find(template_id)
            .first::<TemplateRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(PromptTemplate::from))
    }

    /// List templates for a source, ordered by name then version.
    pub async fn list_by_source(
        &self,
        source_id: &str,
    ) -> Result<Vec<PromptTemplate>, DieselError> {
        let mut conn = self.pool.get().await?;

        templates::table
            .filter(templates::source_id.eq(source_id))
            .order((templates::template_name.asc(), templates::version.asc()))
            .load::<TemplateRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(PromptTemplate::from).collect())
    }

    /// Check whether a (name, version) pair is taken within a source,
    /// optionally excluding one template.
    pub async fn name_version_exists(
        &self,
        source_id: &str,
        template_name: &str,
        version: i32,
        exclude_template_id: Option<&str>,
    ) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = templates::table
            .filter(templates::source_id.eq(source_id))
            .filter(templates::template_name.eq(template_name))
            .filter(templates::version.eq(version))
            .count()
            .into_boxed();
        if let Some(id) = exclude_template_id {
            query = query.filter(templates::template_id.ne(id));
        }

        let count: i64 = query.get_result(&mut conn).await?;
        Ok(count > 0)
    }

    /// Create a new template for a source.
    pub async fn create(
        &self,
        source_id: &str,
        new: &NewTemplate,
    ) -> Result<PromptTemplate, DieselError> {
        let mut conn = self.pool.get().await?;

        let template_id = Uuid::new_v4().to_string();
        let now = now_rfc3339();
        let variables = encode_json_opt(&new.variables);
        let record = NewTemplateRecord {
            template_id: &template_id,
            source_id,
            template_name: &new.template_name,
            template_type: new.template_type.as_deref(),
            language_code: new.language_code.as_deref(),
            prompt_text: &new.prompt_text,
            variables: variables.as_deref(),
            usage_count: 0,
            is_active: new.is_active,
            version: new.version,
            created_at: &now,
            updated_at: &now,
        };

        diesel::insert_into(templates::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        Ok(PromptTemplate {
            template_id,
            source_id: source_id.to_string(),
            template_name: new.template_name.clone(),
            template_type: new.template_type.clone(),
            language_code: new.language_code.clone(),
            prompt_text: new.prompt_text.clone(),
            variables: new.variables.clone(),
            usage_count: 0,
            avg_confidence: None,
            avg_tokens_used: None,
            is_active: new.is_active,
            version: new.version,
            created_at: parse_datetime(&now),
            updated_at: parse_datetime(&now),
        })
    }

    /// Apply a partial update. Returns the updated template, or None if
    /// the ID does not resolve.
    pub async fn update(
        &self,
        template_id: &str,
        patch: &TemplatePatch,
    ) -> Result<Option<PromptTemplate>, DieselError> {
        let mut conn = self.pool.get().await?;

        let changes = TemplateChangeset {
            template_name: patch.template_name.clone(),
            template_type: patch.template_type.clone(),
            language_code: patch.language_code.clone(),
            prompt_text: patch.prompt_text.clone(),
            variables: encode_json_opt(&patch.variables),
            is_active: patch.is_active,
            version: patch.version,
            updated_at: Some(now_rfc3339()),
        };

        let rows = diesel::update(templates::table.find(template_id))
            .set(&changes)
            .execute(&mut conn)
            .await?;

        if rows == 0 {
            return Ok(None);
        }

        templates::table
            .find(template_id)
            .first::<TemplateRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(PromptTemplate::from))
    }

    /// Delete a template. Returns false if the ID does not resolve.
    pub async fn delete(&self, template_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(templates::table.find(template_id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}
