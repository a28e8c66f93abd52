//! Infrastructure module for the task store.
//!
//! This module contains the repository trait and its backends, plus the
//! factory that picks a backend from configuration.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use factory::{
    ConfigurationError, FactoryError, RepositoryFactory, StorageConfig, StorageConfigBuilder,
    StorageMode,
};
pub use in_memory::InMemoryTaskRepository;
pub use postgres::PostgresTaskRepository;
pub use repository::{RepositoryError, RepositoryResult, TaskRepository, sort_newest_first};
