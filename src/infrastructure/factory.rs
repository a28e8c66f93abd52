//! Repository factory for runtime backend selection.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//!
//! # Example
//!
//! ```ignore
//! let config = StorageConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use super::{InMemoryTaskRepository, PostgresTaskRepository, TaskRepository};

// =============================================================================
// Configuration Types
// =============================================================================

/// Which task store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` JSONB document table.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    pub storage_mode: StorageMode,
    /// Required when `storage_mode` is `Postgres`.
    pub database_url: Option<String>,
}

impl StorageConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `STORAGE_MODE` is invalid or
    /// `DATABASE_URL` is missing when `STORAGE_MODE=postgres`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let storage_mode = match env::var("STORAGE_MODE") {
            Ok(value) => value.parse()?,
            Err(env::VarError::NotPresent) => StorageMode::default(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigurationError::InvalidStorageMode(
                    "<non-UTF-8 value>".to_string(),
                ));
            }
        };

        // Empty or whitespace-only URLs count as missing
        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let config = Self {
            storage_mode,
            database_url,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` if `Postgres` is
    /// selected without a URL.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

/// Builder for `StorageConfig`.
#[derive(Debug, Clone, Default)]
pub struct StorageConfigBuilder {
    storage_mode: StorageMode,
    database_url: Option<String>,
}

impl StorageConfigBuilder {
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<StorageConfig, ConfigurationError> {
        let config = StorageConfig {
            storage_mode: self.storage_mode,
            database_url: self.database_url,
        };
        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors in storage configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    #[error("Schema setup error: {0}")]
    Schema(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Creates the configured task store.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: StorageConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Connects to the configured backend and returns the repository.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the database connection or schema setup fails.
    pub async fn create(&self) -> Result<Arc<dyn TaskRepository>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Arc::new(InMemoryTaskRepository::new())),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                let repository = PostgresTaskRepository::new(pool);
                repository
                    .ensure_schema()
                    .await
                    .map_err(|error| FactoryError::Schema(error.to_string()))?;
                Ok(Arc::new(repository))
            }
        }
    }

    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .database_url
            .as_ref()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;

        PgPool::connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("inmemory", StorageMode::InMemory)]
    #[case("memory", StorageMode::InMemory)]
    #[case("IN_MEMORY", StorageMode::InMemory)]
    #[case("postgres", StorageMode::Postgres)]
    #[case("postgresql", StorageMode::Postgres)]
    #[case("pg", StorageMode::Postgres)]
    fn test_storage_mode_from_str_valid(#[case] input: &str, #[case] expected: StorageMode) {
        assert_eq!(input.parse::<StorageMode>(), Ok(expected));
    }

    #[rstest]
    #[case("mongo")]
    #[case("")]
    fn test_storage_mode_from_str_invalid(#[case] input: &str) {
        assert_eq!(
            input.parse::<StorageMode>(),
            Err(ConfigurationError::InvalidStorageMode(input.to_string()))
        );
    }

    #[rstest]
    fn test_builder_defaults_to_in_memory() {
        let config = StorageConfig::builder().build().unwrap();
        assert_eq!(config.storage_mode, StorageMode::InMemory);
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn test_builder_postgres_requires_url() {
        let result = StorageConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .build();
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));
    }

    #[rstest]
    fn test_builder_postgres_with_url() {
        let config = StorageConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .database_url("postgres://localhost/tasks")
            .build()
            .unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/tasks")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_factory_creates_in_memory_repository() {
        let factory = RepositoryFactory::new(StorageConfig::default());
        let repository = factory.create().await.unwrap();
        assert_eq!(repository.list().await.map(|tasks| tasks.len()), Ok(0));
    }
}
