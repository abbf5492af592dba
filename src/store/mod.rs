//! Document store subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → DocumentStore::connect (explicitly owned handle)
//!     → shared via Arc through AppState
//!
//! per request:
//!     handler → collection(name) → insert/get/list/replace/remove
//! ```
//!
//! # Design Decisions
//! - The handle is constructed once at startup and passed by reference;
//!   no ambient global connection state
//! - Documents are schemaless JSON values; typed access happens at the
//!   collection API via serde
//! - Listing preserves insertion order via a per-collection sequence number

pub mod document;

pub use document::{Collection, DocumentStore, StoreError};
