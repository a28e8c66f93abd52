//! Application layer: the task service and its error taxonomy.

pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::TaskService;
