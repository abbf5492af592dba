//! Task Manager HTTP API
//!
//! A small CRUD API over a single "tasks" resource, built with Tokio and Axum
//! and backed by an in-process document store.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────────┐
//!                    │                    TASK API                         │
//!                    │                                                     │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌───────────────┐    │
//!   ─────────────────┼─▶│  axum   │──▶│  chain   │──▶│ fault barrier │    │
//!                    │  │ router  │   │  driver  │   │  + handler    │    │
//!                    │  └─────────┘   └──────────┘   └──────┬────────┘    │
//!                    │                                      │             │
//!                    │                             ok       │  failure    │
//!                    │                    ┌─────────────────┼──────────┐  │
//!                    │                    ▼                 ▼          │  │
//!   Client Response  │  ┌─────────┐   ┌──────────┐   ┌───────────────┐│  │
//!   ◀────────────────┼──│response │◀──│responder │◀──│ failure stage ││  │
//!                    │  └─────────┘   └──────────┘   └───────────────┘│  │
//!                    │                                                │  │
//!                    │  ┌───────────────────────────────────────────┐ │  │
//!                    │  │          Cross-Cutting Concerns           │ │  │
//!                    │  │  ┌────────┐ ┌───────┐ ┌──────────────┐    │ │  │
//!                    │  │  │ config │ │ store │ │observability │    │ │  │
//!                    │  │  └────────┘ └───────┘ └──────────────┘    │ │  │
//!                    │  │  ┌─────────────────────────────────────┐  │ │  │
//!                    │  │  │      lifecycle (startup/shutdown)   │  │ │  │
//!                    │  │  └─────────────────────────────────────┘  │ │  │
//!                    │  └───────────────────────────────────────────┘ │  │
//!                    └────────────────────────────────────────────────┘  │
//! ```
//!
//! Every route handler is registered through the fault barrier: a failure
//! raised anywhere in a handler, before or after a suspension point, is
//! relayed to the centralized failure stage instead of propagating uncaught.

// Core subsystems
pub mod config;
pub mod fault;
pub mod http;
pub mod store;
pub mod tasks;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use fault::fault_barrier;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::DocumentStore;
