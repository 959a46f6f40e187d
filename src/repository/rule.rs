//! Normalization rule repository.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::pool::{AsyncSqlitePool, DieselError};
use super::records::{NewRuleRecord, RuleChangeset, RuleRecord};
use super::{decode_string_list, encode_string_list, now_rfc3339, parse_datetime};
use crate::models::{NewRule, NormalizationRule, RulePatch};
use crate::schema::source_normalization_rules as rules;

/// Convert a database record to a domain model.
impl From<RuleRecord> for NormalizationRule {
    fn from(record: RuleRecord) -> Self {
        NormalizationRule {
            rule_id: record.rule_id,
            source_id: record.source_id,
            rule_name: record.rule_name,
            rule_type: record.rule_type,
            pattern: record.pattern,
            replacement: record.replacement,
            is_regex: record.is_regex,
            apply_to_sections: decode_string_list(&record.apply_to_sections),
            priority: record.priority,
            is_active: record.is_active,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Repository for normalization rules.
#[derive(Clone)]
pub struct RuleRepository {
    pool: AsyncSqlitePool,
}

impl RuleRepository {
    /// Create a new rule repository with an existing connection factory.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Get a rule by ID.
    pub async fn get(&self, rule_id: &str) -> Result<Option<NormalizationRule>, DieselError> {
        let mut conn = self.pool.get().await?;

        rules::table
            .find(rule_id)
            .first::<RuleRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(NormalizationRule::from))
    }

    /// List rules for a source in application order (priority ascending,
    /// lower runs first), optionally restricted to active rules.
    pub async fn list_by_source(
        &self,
        source_id: &str,
        active_only: bool,
    ) -> Result<Vec<NormalizationRule>, DieselError> {
        let mut conn = self.pool.get().await?;

        let mut query = rules::table
            .filter(rules::source_id.eq(source_id))
            .into_boxed();
        if active_only {
            query = query.filter(rules::is_active.eq(true));
        }

        query
            .order((rules::priority.asc(), rules::rule_name.asc()))
            .load::<RuleRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(NormalizationRule::from).collect())
    }

    /// Create a new rule for a source.
    pub async fn create(
        &self,
        source_id: &str,
        new: &NewRule,
    ) -> Result<NormalizationRule, DieselError> {
        let mut conn = self.pool.get().await?;

        let rule_id = Uuid::new_v4().to_string();
        let now = now_rfc3339();
        let sections = encode_string_list(&new.apply_to_sections);
        let record = NewRuleRecord {
            rule_id: &rule_id,
            source_id,
            rule_name: &new.rule_name,
            rule_type: new.rule_type.as_deref(),
            pattern: &new.pattern,
            replacement: new.replacement.as_deref(),
            is_regex: new.is_regex,
            apply_to_sections: &sections,
            priority: new.priority,
            is_active: new.is_active,
            created_at: &now,
            updated_at: &now,
        };

        diesel::insert_into(rules::table)
            .values(&record)
            .execute(&mut conn)
            .await?;

        Ok(NormalizationRule {
            rule_id,
            source_id: source_id.to_string(),
            rule_name: new.rule_name.clone(),
            rule_type: new.rule_type.clone(),
            pattern: new.pattern.clone(),
            replacement: new.replacement.clone(),
            is_regex: new.is_regex,
            apply_to_sections: new.apply_to_sections.clone(),
            priority: new.priority,
            is_active: new.is_active,
            created_at: parse_datetime(&now),
            updated_at: parse_datetime(&now),
        })
    }

    /// Apply a partial update. Returns the updated rule, or None if the
    /// ID does not resolve.
    pub async fn update(
        &self,
        rule_id: &str,
        patch: &RulePatch,
    ) -> Result<Option<NormalizationRule>, DieselError> {
        let mut conn = self.pool.get().await?;

        let changes = RuleChangeset {
            rule_name: patch.rule_name.clone(),
            rule_type: patch.rule_type.clone(),
            pattern: patch.pattern.clone(),
            replacement: patch.replacement.clone(),
            is_regex: patch.is_regex,
            apply_to_sections: patch
                .apply_to_sections
                .as_ref()
                .map(|sections| encode_string_list(sections)),
            priority: patch.priority,
            is_active: patch.is_active,
            updated_at: Some(now_rfc3339()),
        };

        let rows = diesel::update(rules::table.find(rule_id))
            .set(&changes)
            .execute(&mut conn)
            .await?;

        if rows == 0 {
            return Ok(None);
        }

        rules::table
            .find(rule_id)
            .first::<RuleRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(NormalizationRule::from))
    }

    /// Delete a rule. Returns false if the ID does not resolve.
    pub async fn delete(&self, rule_id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(rules::table.find(rule_id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewSource;
    use crate::repository::SourceRepository;
    use tempfile::tempdir;

    async fn setup_test_db() -> (AsyncSqlitePool, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db_url = db_path.display().to_string();

        crate::repository::migrate::run_migrations(&db_url)
            .await
            .unwrap();

        let pool = AsyncSqlitePool::new(&db_url);
        SourceRepository::new(pool.clone())
            .create(&NewSource {
                source_id: "cr-sc".to_string(),
                source_name: "Test Court".to_string(),
                country_code: None,
                primary_language: None,
                secondary_languages: vec![],
                legal_system: None,
                document_type: None,
                is_active: true,
                phase: 1,
            })
            .await
            .unwrap();

        (pool, dir)
    }

    fn test_rule(name: &str, priority: i32) -> NewRule {
        NewRule {
            rule_name: name.to_string(),
            rule_type: Some("whitespace".to_string()),
            pattern: r"\s+".to_string(),
            replacement: Some(" ".to_string()),
            is_regex: true,
            apply_to_sections: vec!["header".to_string()],
            priority,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_rules_ordered_by_priority() {
        let (pool, _dir) = setup_test_db().await;
        let repo = RuleRepository::new(pool);

        repo.create("cr-sc", &test_rule("late", 200)).await.unwrap();
        repo.create("cr-sc", &test_rule("early", 10)).await.unwrap();

        let listed = repo.list_by_source("cr-sc", false).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].rule_name, "early");
        assert_eq!(listed[1].rule_name, "late");
    }

    #[tokio::test]
    async fn test_active_filter_and_delete() {
        let (pool, _dir) = setup_test_db().await;
        let repo = RuleRepository::new(pool);

        let rule = repo.create("cr-sc", &test_rule("strip", 100)).await.unwrap();
        assert_eq!(rule.apply_to_sections, vec!["header".to_string()]);

        let patch = RulePatch {
            is_active: Some(false),
            ..Default::default()
        };
        repo.update(&rule.rule_id, &patch).await.unwrap().unwrap();

        assert!(repo.list_by_source("cr-sc", true).await.unwrap().is_empty());
        assert_eq!(repo.list_by_source("cr-sc", false).await.unwrap().len(), 1);

        assert!(repo.delete(&rule.rule_id).await.unwrap());
        assert!(!repo.delete(&rule.rule_id).await.unwrap());
    }
}
