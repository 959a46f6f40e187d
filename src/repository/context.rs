//! Database context for repository access.
//!
//! Provides a unified entry point for database operations. Create one
//! context per command or service, then use it to hand out repositories.

use diesel_async::SimpleAsyncConnection;

use super::field::FieldRepository;
use super::pool::{AsyncSqlitePool, DieselError};
use super::profile::ProfileRepository;
use super::rule::RuleRepository;
use super::source::SourceRepository;
use super::template::TemplateRepository;

/// Database context that owns the connection factory and provides
/// repository access.
#[derive(Clone)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a new database context from a database URL or file path.
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    /// Get the underlying connection factory.
    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    /// Get a source repository.
    pub fn sources(&self) -> SourceRepository {
        SourceRepository::new(self.pool.clone())
    }

    /// Get an extraction profile repository.
    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.pool.clone())
    }

    /// Get a field definition repository.
    pub fn fields(&self) -> FieldRepository {
        FieldRepository::new(self.pool.clone())
    }

    /// Get a normalization rule repository.
    pub fn rules(&self) -> RuleRepository {
        RuleRepository::new(self.pool.clone())
    }

    /// Get a prompt template repository.
    pub fn templates(&self) -> TemplateRepository {
        TemplateRepository::new(self.pool.clone())
    }

    /// Verify the database connection works. Used by the readiness probe.
    pub async fn ping(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute("SELECT 1").await
    }

    /// Apply pending migrations to this context's database.
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        super::migrate::run_migrations(self.pool.database_url()).await
    }
}
