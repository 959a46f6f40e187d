//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! over SQLite, via diesel-async's SyncConnectionWrapper.

pub mod context;
pub mod migrate;
pub mod pool;
pub mod records;
pub mod util;

// Repositories
pub mod field;
pub mod profile;
pub mod rule;
pub mod source;
pub mod template;

pub use context::DbContext;
pub use field::{FieldFilters, FieldRepository};
pub use pool::{AsyncSqlitePool, DieselError};
pub use profile::ProfileRepository;
pub use rule::RuleRepository;
pub use source::SourceRepository;
pub use template::TemplateRepository;

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Current time as the RFC 3339 string stored in timestamp columns.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Serialize a string list for a JSON TEXT column.
pub fn encode_string_list(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a string list from a JSON TEXT column.
pub fn decode_string_list(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

/// Serialize an optional JSON value for a TEXT column.
pub fn encode_json_opt(value: &Option<serde_json::Value>) -> Option<String> {
    value.as_ref().map(|v| v.to_string())
}

/// Deserialize an optional JSON value from a TEXT column.
pub fn decode_json_opt(s: Option<String>) -> Option<serde_json::Value> {
    s.and_then(|s| serde_json::from_str(&s).ok())
}
