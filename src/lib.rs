//! Task manager: a REST API over a document store and the client-side state
//! controller that consumes it.
//!
//! # Layers
//!
//! - [`domain`]: task records and the pure task rules
//! - [`application`]: the task service and its error taxonomy
//! - [`infrastructure`]: task stores (in-memory, `PostgreSQL`) and backend selection
//! - [`api`]: axum handlers, DTOs and HTTP error mapping
//! - [`server`]: bind and graceful shutdown
//! - [`client`]: HTTP client, list reducer, controller, form and card models

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod server;
