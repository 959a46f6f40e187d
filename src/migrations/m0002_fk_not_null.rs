use cetane::prelude::*;

// The initial schema left child-table source_id columns nullable. Every
// child row must belong to a source, so this migration tightens the
// columns to NOT NULL. SQLite cannot alter column nullability in place,
// hence the table rebuilds; rows with a NULL source_id are dropped.
pub fn migration() -> Migration {
    Migration::new("0002_fk_not_null")
        .depends_on(&["0001_initial_schema"])
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_extraction_profiles_new (
    profile_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT NOT NULL REFERENCES document_sources(source_id),
    profile_name TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    is_default BOOLEAN NOT NULL DEFAULT 0,
    pdf_extraction_method TEXT NOT NULL DEFAULT 'pdfplumber',
    ocr_threshold DOUBLE NOT NULL DEFAULT 0.80,
    ocr_language TEXT,
    use_document_ai_fallback BOOLEAN NOT NULL DEFAULT 1,
    segmentation_method TEXT NOT NULL DEFAULT 'section_based',
    segment_size_tokens INTEGER NOT NULL DEFAULT 3000,
    segment_overlap_tokens INTEGER NOT NULL DEFAULT 200,
    llm_model_quick TEXT NOT NULL DEFAULT 'gemini-1.5-flash',
    llm_model_detailed TEXT NOT NULL DEFAULT 'gemini-1.5-pro',
    llm_temperature DOUBLE NOT NULL DEFAULT 0.1,
    max_retries INTEGER NOT NULL DEFAULT 2,
    max_cost_per_document DOUBLE NOT NULL DEFAULT 2.00,
    enable_deep_dive_pass BOOLEAN NOT NULL DEFAULT 1,
    deep_dive_confidence_threshold DOUBLE NOT NULL DEFAULT 0.75,
    version INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
INSERT INTO source_extraction_profiles_new
    SELECT * FROM source_extraction_profiles WHERE source_id IS NOT NULL;
DROP TABLE source_extraction_profiles;
ALTER TABLE source_extraction_profiles_new RENAME TO source_extraction_profiles;
CREATE UNIQUE INDEX uq_profiles_source_name ON source_extraction_profiles(source_id, profile_name);
CREATE INDEX idx_profiles_source ON source_extraction_profiles(source_id)"#,
                )
                .for_backend(
                    "postgres",
                    r#"DELETE FROM source_extraction_profiles WHERE source_id IS NULL;
ALTER TABLE source_extraction_profiles ALTER COLUMN source_id SET NOT NULL"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_field_definitions_new (
    field_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT NOT NULL REFERENCES document_sources(source_id),
    field_name TEXT NOT NULL,
    field_display_name TEXT,
    field_category TEXT,
    field_type TEXT,
    extraction_method TEXT,
    extraction_section TEXT,
    regex_pattern TEXT,
    llm_prompt_template_id TEXT,
    is_required BOOLEAN NOT NULL DEFAULT 0,
    validation_rules TEXT,
    confidence_threshold DOUBLE NOT NULL DEFAULT 0.75,
    normalization_rules TEXT,
    display_order INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
INSERT INTO source_field_definitions_new
    SELECT * FROM source_field_definitions WHERE source_id IS NOT NULL;
DROP TABLE source_field_definitions;
ALTER TABLE source_field_definitions_new RENAME TO source_field_definitions;
CREATE UNIQUE INDEX uq_fields_source_name ON source_field_definitions(source_id, field_name);
CREATE INDEX idx_fields_source ON source_field_definitions(source_id);
CREATE INDEX idx_fields_category ON source_field_definitions(source_id, field_category)"#,
                )
                .for_backend(
                    "postgres",
                    r#"DELETE FROM source_field_definitions WHERE source_id IS NULL;
ALTER TABLE source_field_definitions ALTER COLUMN source_id SET NOT NULL"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_normalization_rules_new (
    rule_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT NOT NULL REFERENCES document_sources(source_id),
    rule_name TEXT NOT NULL,
    rule_type TEXT,
    pattern TEXT NOT NULL,
    replacement TEXT,
    is_regex BOOLEAN NOT NULL DEFAULT 0,
    apply_to_sections TEXT NOT NULL DEFAULT '[]',
    priority INTEGER NOT NULL DEFAULT 100,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
INSERT INTO source_normalization_rules_new
    SELECT * FROM source_normalization_rules WHERE source_id IS NOT NULL;
DROP TABLE source_normalization_rules;
ALTER TABLE source_normalization_rules_new RENAME TO source_normalization_rules;
CREATE INDEX idx_rules_source ON source_normalization_rules(source_id, is_active)"#,
                )
                .for_backend(
                    "postgres",
                    r#"DELETE FROM source_normalization_rules WHERE source_id IS NULL;
ALTER TABLE source_normalization_rules ALTER COLUMN source_id SET NOT NULL"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_prompt_templates_new (
    template_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT NOT NULL REFERENCES document_sources(source_id),
    template_name TEXT NOT NULL,
    template_type TEXT,
    language_code TEXT,
    prompt_text TEXT NOT NULL,
    variables TEXT,
    usage_count BIGINT NOT NULL DEFAULT 0,
    avg_confidence DOUBLE,
    avg_tokens_used INTEGER,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    version INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
INSERT INTO source_prompt_templates_new
    SELECT * FROM source_prompt_templates WHERE source_id IS NOT NULL;
DROP TABLE source_prompt_templates;
ALTER TABLE source_prompt_templates_new RENAME TO source_prompt_templates;
CREATE UNIQUE INDEX uq_templates_source_name_version ON source_prompt_templates(source_id, template_name, version);
CREATE INDEX idx_templates_source ON source_prompt_templates(source_id, is_active)"#,
                )
                .for_backend(
                    "postgres",
                    r#"DELETE FROM source_prompt_templates WHERE source_id IS NULL;
ALTER TABLE source_prompt_templates ALTER COLUMN source_id SET NOT NULL"#,
                ),
        )
}
