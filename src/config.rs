//! Configuration management for docmine.
//!
//! Settings are constructed once at startup from environment variables
//! (plus an optional `.env` file loaded in `main`) and passed by reference
//! to the components that need them. There is no global settings cache.

use std::fs;
use std::path::PathBuf;

use crate::repository::DbContext;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "docmine.db";

/// Default bind port for the API server.
pub const DEFAULT_PORT: u16 = 8000;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    /// Supports sqlite: URLs. Set via DATABASE_URL env var.
    pub database_url: Option<String>,
    /// Host the API server binds to.
    pub api_host: String,
    /// Port the API server binds to.
    pub api_port: u16,
    /// Allowed CORS origins (empty = permissive).
    pub allowed_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/.local/share-ish data dir, falling back gracefully:
        // data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docmine");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            api_host: "127.0.0.1".to_string(),
            api_port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the environment, starting from defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(dir) = std::env::var("DOCMINE_DATA_DIR") {
            if !dir.is_empty() {
                settings.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                settings.database_url = Some(url);
            }
        }
        if let Ok(host) = std::env::var("DOCMINE_API_HOST") {
            if !host.is_empty() {
                settings.api_host = host;
            }
        }
        if let Ok(port) = std::env::var("DOCMINE_API_PORT") {
            if let Ok(port) = port.parse() {
                settings.api_port = port;
            }
        }
        if let Ok(origins) = std::env::var("DOCMINE_ALLOWED_ORIGINS") {
            settings.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        settings
    }

    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            let path = self.data_dir.join(&self.database_filename);
            format!("sqlite:{}", path.display())
        }
    }

    /// Get the full path to the database (for file-based databases).
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Create a database context using the configured database URL or path.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_from_path() {
        let settings = Settings::with_data_dir(PathBuf::from("/tmp/docmine-test"));
        assert_eq!(
            settings.database_url(),
            "sqlite:/tmp/docmine-test/docmine.db"
        );
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let mut settings = Settings::with_data_dir(PathBuf::from("/tmp/docmine-test"));
        settings.database_url = Some("sqlite:/elsewhere/other.db".to_string());
        assert_eq!(settings.database_url(), "sqlite:/elsewhere/other.db");
    }
}
