//! HTTP server bootstrap: address configuration, bind, and graceful shutdown.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)

use std::env;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reads `HOST` and `PORT`, falling back to defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidPort` if `PORT` is set but not a valid port.
    pub fn from_env() -> Result<Self, ServerError> {
        let defaults = Self::default();

        let host = env::var("HOST")
            .ok()
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or(defaults.host);

        let port = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ServerError::InvalidPort(value))?,
            Err(_) => defaults.port,
        };

        Ok(Self { host, port })
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid PORT value: '{0}'")]
    InvalidPort(String),

    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

// =============================================================================
// Server
// =============================================================================

pub struct Server {
    config: ServerConfig,
}

impl Server {
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds the configured address and serves `router` until a shutdown
    /// signal (Ctrl+C or SIGTERM) arrives.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if binding or serving fails.
    pub async fn run(self, router: Router) -> Result<(), ServerError> {
        let address = self.config.socket_addr();

        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;

        match listener.local_addr() {
            Ok(local) => tracing::info!("Listening on {}", local),
            Err(error) => tracing::warn!(%error, "Could not determine local address"),
        }

        serve(listener, router, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Serves `router` on an already bound listener until `shutdown` resolves.
///
/// Split out from [`Server::run`] so callers that bind an ephemeral port can
/// learn the address before serving.
///
/// # Errors
///
/// Returns `ServerError::Serve` if the server loop fails.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

// =============================================================================
// Shutdown Signal
// =============================================================================

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
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
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }

    #[rstest]
    fn test_socket_addr_formats_correctly() {
        let config = ServerConfig::new("localhost", 8080);
        assert_eq!(config.socket_addr(), "localhost:8080");
    }

    #[rstest]
    fn test_server_keeps_config() {
        let server = Server::new(ServerConfig::new("127.0.0.1", 4000));
        assert_eq!(server.config().port, 4000);
    }

    #[rstest]
    fn test_invalid_port_error_message() {
        let error = ServerError::InvalidPort("http".to_string());
        assert_eq!(error.to_string(), "Invalid PORT value: 'http'");
    }
}
