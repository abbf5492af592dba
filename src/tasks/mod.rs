//! The tasks resource.
//!
//! # Data Flow
//! ```text
//! /api/v1/tasks[/{id}]
//!     → server.rs route adapters (extract path params)
//!     → handlers.rs (read body, talk to the store, write response)
//!     → failures relayed through the fault barrier to http::error
//! ```

pub mod handlers;
pub mod model;

pub use model::{CreateTask, Task, UpdateTask};
