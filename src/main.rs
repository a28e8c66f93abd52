//! Task manager API server.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `task_manager=debug`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_manager::api::{AppState, create_router};
use task_manager::application::TaskService;
use task_manager::infrastructure::{RepositoryFactory, StorageConfig};
use task_manager::server::{Server, ServerConfig};

/// Outcome of reading `WORKER_THREADS`.
struct WorkerThreads {
    threads: Option<usize>,
    warning_emitted: bool,
}

impl WorkerThreads {
    const fn default_count(warning_emitted: bool) -> Self {
        Self {
            threads: None,
            warning_emitted,
        }
    }
}

fn parse_worker_threads() -> WorkerThreads {
    let Ok(value) = std::env::var("WORKER_THREADS") else {
        return WorkerThreads::default_count(false);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return WorkerThreads::default_count(false);
    }

    match trimmed.parse::<usize>() {
        Ok(0) => {
            eprintln!("Warning: WORKER_THREADS=0 is invalid (must be > 0), using default");
            WorkerThreads::default_count(true)
        }
        Ok(count) => {
            let max_threads = std::thread::available_parallelism()
                .map(|parallelism| parallelism.get().saturating_mul(4))
                .unwrap_or(64);
            if count > max_threads {
                eprintln!(
                    "Warning: WORKER_THREADS={count} exceeds recommended limit ({max_threads}), capping to {max_threads}"
                );
                WorkerThreads {
                    threads: Some(max_threads),
                    warning_emitted: true,
                }
            } else {
                WorkerThreads {
                    threads: Some(count),
                    warning_emitted: false,
                }
            }
        }
        Err(error) => {
            eprintln!(
                "Warning: WORKER_THREADS='{trimmed}' is not a valid number ({error}), using default"
            );
            WorkerThreads::default_count(true)
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();

    let worker_threads = parse_worker_threads();
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if let Some(threads) = worker_threads.threads {
        builder.worker_threads(threads);
        if !worker_threads.warning_emitted {
            eprintln!("Tokio worker_threads set to: {threads}");
        }
    }

    let runtime = match builder.build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("Failed to create tokio runtime: {error}");
            std::process::exit(1);
        }
    };
    runtime.block_on(async_main());
}

async fn async_main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_manager=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting task manager API");

    let config = match StorageConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(storage_mode = ?config.storage_mode, "Storage configuration loaded");

    let repository = match RepositoryFactory::new(config).create().await {
        Ok(repository) => {
            tracing::info!("Task store initialized");
            repository
        }
        Err(error) => {
            tracing::error!("Failed to initialize task store: {}", error);
            std::process::exit(1);
        }
    };

    let state = AppState::new(TaskService::new(repository));
    let router = create_router(state);

    let server_config = match ServerConfig::from_env() {
        Ok(server_config) => server_config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    if let Err(error) = Server::new(server_config).run(router).await {
        tracing::error!("{}", error);
        std::process::exit(1);
    }
}
