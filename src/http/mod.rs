//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → request.rs (request ID stamping & propagation)
//!     → chain driver (build HandlingContext, run barrier-wrapped handler)
//!     → error.rs (format relayed failures)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
