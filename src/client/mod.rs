//! Client side of the task manager.
//!
//! - [`http`]: the remote calls (`TaskApi`, `HttpTaskApi`)
//! - [`state`]: the task list as a pure reducer
//! - [`controller`]: session owner that reconciles the list with the server
//! - [`form`] / [`card`]: input and display models

pub mod card;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod state;

pub use card::{TaskCard, format_due};
pub use controller::ClientStateController;
pub use error::{ClientError, FilterError, FormError};
pub use form::{EditForm, TaskForm};
pub use http::{ClientResult, DEFAULT_BASE_URL, HttpTaskApi, TaskApi};
pub use state::{Filter, TaskListEvent, TaskListState};
