//! Failure relay for the request-handling chain.
//!
//! # Data Flow
//! ```text
//! chain driver builds HandlingContext (request, responder, continuation)
//!     → fault_barrier(handler) produces a guarded handler
//!     → guarded handler runs the wrapped handler to completion
//!         ok  → response side effects stand, continuation untouched
//!         err → failure relayed through the continuation, exactly once
//! ```
//!
//! # Design Decisions
//! - The barrier itself never fails and adds no suspension points; it only
//!   observes the wrapped handler's outcome
//! - A fresh continuation-capturing closure per invocation: no shared
//!   mutable state, concurrent requests cannot interfere
//! - The continuation fires at most once per context; later invocations
//!   are dropped with a warning

pub mod barrier;
pub mod context;

pub use barrier::{fault_barrier, Continuation, Fault};
pub use context::{HandlingContext, Responder, RouteParams};
