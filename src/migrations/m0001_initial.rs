use cetane::prelude::*;

pub fn migration() -> Migration {
    Migration::new("0001_initial_schema")
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE document_sources (
    source_id TEXT PRIMARY KEY NOT NULL,
    source_name TEXT NOT NULL,
    country_code TEXT,
    primary_language TEXT,
    secondary_languages TEXT NOT NULL DEFAULT '[]',
    legal_system TEXT,
    document_type TEXT,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    phase INTEGER NOT NULL DEFAULT 1,
    total_documents_processed BIGINT NOT NULL DEFAULT 0,
    avg_accuracy DOUBLE,
    avg_cost_per_document DOUBLE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE IF NOT EXISTS document_sources (
    source_id TEXT PRIMARY KEY,
    source_name TEXT NOT NULL,
    country_code TEXT,
    primary_language TEXT,
    secondary_languages TEXT NOT NULL DEFAULT '[]',
    legal_system TEXT,
    document_type TEXT,
    is_active BOOLEAN NOT NULL DEFAULT true,
    phase INTEGER NOT NULL DEFAULT 1,
    total_documents_processed BIGINT NOT NULL DEFAULT 0,
    avg_accuracy DOUBLE PRECISION,
    avg_cost_per_document DOUBLE PRECISION,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    // source_id intentionally nullable; tightened in 0002
                    r#"CREATE TABLE source_extraction_profiles (
    profile_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT REFERENCES document_sources(source_id),
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
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE IF NOT EXISTS source_extraction_profiles (
    profile_id TEXT PRIMARY KEY,
    source_id TEXT REFERENCES document_sources(source_id),
    profile_name TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_default BOOLEAN NOT NULL DEFAULT false,
    pdf_extraction_method TEXT NOT NULL DEFAULT 'pdfplumber',
    ocr_threshold DOUBLE PRECISION NOT NULL DEFAULT 0.80,
    ocr_language TEXT,
    use_document_ai_fallback BOOLEAN NOT NULL DEFAULT true,
    segmentation_method TEXT NOT NULL DEFAULT 'section_based',
    segment_size_tokens INTEGER NOT NULL DEFAULT 3000,
    segment_overlap_tokens INTEGER NOT NULL DEFAULT 200,
    llm_model_quick TEXT NOT NULL DEFAULT 'gemini-1.5-flash',
    llm_model_detailed TEXT NOT NULL DEFAULT 'gemini-1.5-pro',
    llm_temperature DOUBLE PRECISION NOT NULL DEFAULT 0.1,
    max_retries INTEGER NOT NULL DEFAULT 2,
    max_cost_per_document DOUBLE PRECISION NOT NULL DEFAULT 2.00,
    enable_deep_dive_pass BOOLEAN NOT NULL DEFAULT true,
    deep_dive_confidence_threshold DOUBLE PRECISION NOT NULL DEFAULT 0.75,
    version INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_field_definitions (
    field_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT REFERENCES document_sources(source_id),
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
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE IF NOT EXISTS source_field_definitions (
    field_id TEXT PRIMARY KEY,
    source_id TEXT REFERENCES document_sources(source_id),
    field_name TEXT NOT NULL,
    field_display_name TEXT,
    field_category TEXT,
    field_type TEXT,
    extraction_method TEXT,
    extraction_section TEXT,
    regex_pattern TEXT,
    llm_prompt_template_id TEXT,
    is_required BOOLEAN NOT NULL DEFAULT false,
    validation_rules TEXT,
    confidence_threshold DOUBLE PRECISION NOT NULL DEFAULT 0.75,
    normalization_rules TEXT,
    display_order INTEGER,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_normalization_rules (
    rule_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT REFERENCES document_sources(source_id),
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
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE IF NOT EXISTS source_normalization_rules (
    rule_id TEXT PRIMARY KEY,
    source_id TEXT REFERENCES document_sources(source_id),
    rule_name TEXT NOT NULL,
    rule_type TEXT,
    pattern TEXT NOT NULL,
    replacement TEXT,
    is_regex BOOLEAN NOT NULL DEFAULT false,
    apply_to_sections TEXT NOT NULL DEFAULT '[]',
    priority INTEGER NOT NULL DEFAULT 100,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    r#"CREATE TABLE source_prompt_templates (
    template_id TEXT PRIMARY KEY NOT NULL,
    source_id TEXT REFERENCES document_sources(source_id),
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
)"#,
                )
                .for_backend(
                    "postgres",
                    r#"CREATE TABLE IF NOT EXISTS source_prompt_templates (
    template_id TEXT PRIMARY KEY,
    source_id TEXT REFERENCES document_sources(source_id),
    template_name TEXT NOT NULL,
    template_type TEXT,
    language_code TEXT,
    prompt_text TEXT NOT NULL,
    variables TEXT,
    usage_count BIGINT NOT NULL DEFAULT 0,
    avg_confidence DOUBLE PRECISION,
    avg_tokens_used INTEGER,
    is_active BOOLEAN NOT NULL DEFAULT true,
    version INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)"#,
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE UNIQUE INDEX uq_profiles_source_name ON source_extraction_profiles(source_id, profile_name)",
                )
                .for_backend(
                    "postgres",
                    "CREATE UNIQUE INDEX IF NOT EXISTS uq_profiles_source_name ON source_extraction_profiles(source_id, profile_name)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE UNIQUE INDEX uq_fields_source_name ON source_field_definitions(source_id, field_name)",
                )
                .for_backend(
                    "postgres",
                    "CREATE UNIQUE INDEX IF NOT EXISTS uq_fields_source_name ON source_field_definitions(source_id, field_name)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE UNIQUE INDEX uq_templates_source_name_version ON source_prompt_templates(source_id, template_name, version)",
                )
                .for_backend(
                    "postgres",
                    "CREATE UNIQUE INDEX IF NOT EXISTS uq_templates_source_name_version ON source_prompt_templates(source_id, template_name, version)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE INDEX idx_profiles_source ON source_extraction_profiles(source_id)",
                )
                .for_backend(
                    "postgres",
                    "CREATE INDEX IF NOT EXISTS idx_profiles_source ON source_extraction_profiles(source_id)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE INDEX idx_fields_source ON source_field_definitions(source_id)",
                )
                .for_backend(
                    "postgres",
                    "CREATE INDEX IF NOT EXISTS idx_fields_source ON source_field_definitions(source_id)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE INDEX idx_fields_category ON source_field_definitions(source_id, field_category)",
                )
                .for_backend(
                    "postgres",
                    "CREATE INDEX IF NOT EXISTS idx_fields_category ON source_field_definitions(source_id, field_category)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE INDEX idx_rules_source ON source_normalization_rules(source_id, is_active)",
                )
                .for_backend(
                    "postgres",
                    "CREATE INDEX IF NOT EXISTS idx_rules_source ON source_normalization_rules(source_id, is_active)",
                ),
        )
        .operation(
            RunSql::portable()
                .for_backend(
                    "sqlite",
                    "CREATE INDEX idx_templates_source ON source_prompt_templates(source_id, is_active)",
                )
                .for_backend(
                    "postgres",
                    "CREATE INDEX IF NOT EXISTS idx_templates_source ON source_prompt_templates(source_id, is_active)",
                ),
        )
}
