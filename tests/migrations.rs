//! Migration schema tests.
//!
//! Applies the code-defined migration registry to a fresh SQLite database
//! and verifies the committed schema: table set, named unique indexes,
//! and the tightened NOT NULL on child source_id columns.

use rusqlite::Connection;

const CHILD_TABLES: [&str; 4] = [
    "source_extraction_profiles",
    "source_field_definitions",
    "source_normalization_rules",
    "source_prompt_templates",
];

/// Apply all migrations in dependency order.
fn migrated_connection() -> Connection {
    use cetane::backend::Sqlite;

    let conn = Connection::open_in_memory().unwrap();
    let registry = docmine::migrations::registry();
    let backend = Sqlite;

    let ordered = registry
        .resolve_order()
        .expect("Failed to resolve migration order");
    for name in ordered {
        let migration = registry.get(name).expect("Migration not found after resolve");
        for stmt in migration.forward_sql(&backend) {
            if stmt.trim().is_empty() {
                continue;
            }
            conn.execute_batch(&stmt).unwrap();
        }
    }

    conn
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

fn index_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name NOT LIKE 'sqlite_%'")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

/// (not_null, default_value) for a column, from PRAGMA table_info.
fn column_info(conn: &Connection, table: &str, column: &str) -> (bool, Option<String>) {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info(\"{}\")", table))
        .unwrap();
    let rows: Vec<(String, bool, Option<String>)> = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get(3)?, row.get(4)?))
        })
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    rows.into_iter()
        .find(|(name, _, _)| name == column)
        .map(|(_, not_null, default)| (not_null, default))
        .unwrap_or_else(|| panic!("column {}.{} not found", table, column))
}

#[test]
fn all_configuration_tables_created() {
    let conn = migrated_connection();
    let tables = table_names(&conn);

    assert!(tables.contains(&"document_sources".to_string()));
    for table in CHILD_TABLES {
        assert!(tables.contains(&table.to_string()), "missing table {}", table);
    }
}

#[test]
fn named_unique_indexes_present() {
    let conn = migrated_connection();
    let indexes = index_names(&conn);

    for unique in [
        "uq_profiles_source_name",
        "uq_fields_source_name",
        "uq_templates_source_name_version",
    ] {
        assert!(indexes.contains(&unique.to_string()), "missing index {}", unique);
    }
}

#[test]
fn secondary_indexes_present() {
    let conn = migrated_connection();
    let indexes = index_names(&conn);

    for index in [
        "idx_profiles_source",
        "idx_fields_source",
        "idx_fields_category",
        "idx_rules_source",
        "idx_templates_source",
    ] {
        assert!(indexes.contains(&index.to_string()), "missing index {}", index);
    }
}

#[test]
fn child_source_id_tightened_to_not_null() {
    let conn = migrated_connection();

    for table in CHILD_TABLES {
        let (not_null, _) = column_info(&conn, table, "source_id");
        assert!(not_null, "{}.source_id should be NOT NULL", table);
    }
}

#[test]
fn profile_defaults_survive_rebuild() {
    let conn = migrated_connection();

    let (_, size_default) = column_info(&conn, "source_extraction_profiles", "segment_size_tokens");
    assert_eq!(size_default.as_deref(), Some("3000"));
    let (_, overlap_default) =
        column_info(&conn, "source_extraction_profiles", "segment_overlap_tokens");
    assert_eq!(overlap_default.as_deref(), Some("200"));
    let (_, method_default) =
        column_info(&conn, "source_extraction_profiles", "pdf_extraction_method");
    assert_eq!(method_default.as_deref(), Some("'pdfplumber'"));
}

#[test]
fn unique_constraints_enforced_at_storage_level() {
    let conn = migrated_connection();

    conn.execute_batch(
        "INSERT INTO document_sources (source_id, source_name, created_at, updated_at)
         VALUES ('s1', 'Source One', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
    )
    .unwrap();

    conn.execute_batch(
        "INSERT INTO source_field_definitions (field_id, source_id, field_name, created_at, updated_at)
         VALUES ('f1', 's1', 'case_number', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
    )
    .unwrap();

    // Second field with the same (source_id, field_name) must be rejected
    let err = conn
        .execute_batch(
            "INSERT INTO source_field_definitions (field_id, source_id, field_name, created_at, updated_at)
             VALUES ('f2', 's1', 'case_number', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
        )
        .unwrap_err();
    assert!(err.to_string().to_lowercase().contains("unique"));
}

#[test]
fn migrations_are_idempotent_via_tracking_table() {
    // Applying through the tracked runner twice must not fail.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let db_url = db_path.display().to_string();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        docmine::repository::migrate::run_migrations(&db_url)
            .await
            .unwrap();
        docmine::repository::migrate::run_migrations(&db_url)
            .await
            .unwrap();
    });
}
