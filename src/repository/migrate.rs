//! Database migration application.
//!
//! Applies the code-defined migration registry to a SQLite database.
//! Migrations run in dependency order inside a blocking task; applied
//! migration names are tracked in a `schema_migrations` table so reruns
//! are no-ops.

use tracing::info;

/// Run pending migrations for a database URL.
pub async fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    // Strip sqlite: prefix if present - rusqlite expects just the file path
    let path = database_url
        .strip_prefix("sqlite:")
        .unwrap_or(database_url)
        .to_string();

    tokio::task::spawn_blocking(move || apply_pending(&path)).await?
}

fn apply_pending(path: &str) -> anyhow::Result<()> {
    use cetane::backend::Sqlite;

    let conn = rusqlite::Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            name TEXT PRIMARY KEY NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;

    let registry = crate::migrations::registry();
    let backend = Sqlite;

    let ordered = registry
        .resolve_order()
        .map_err(|e| anyhow::anyhow!("failed to resolve migration order: {:?}", e))?;

    let mut applied = 0usize;
    for name in ordered {
        let seen: i64 = conn.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE name = ?1",
            [name],
            |row| row.get(0),
        )?;
        if seen > 0 {
            continue;
        }

        let migration = registry
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("migration '{}' missing after resolve", name))?;

        for stmt in migration.forward_sql(&backend) {
            if stmt.trim().is_empty() {
                continue;
            }
            conn.execute_batch(&stmt)?;
        }

        conn.execute(
            "INSERT INTO schema_migrations (name, applied_at) VALUES (?1, ?2)",
            rusqlite::params![name, chrono::Utc::now().to_rfc3339()],
        )?;
        info!("Applied migration: {}", name);
        applied += 1;
    }

    if applied == 0 {
        info!("No pending migrations");
    }

    Ok(())
}
