//! Per-request handling context.
//!
//! The bundle a handler receives: the inbound request, a controller for the
//! outbound response, and the continuation that hands failures to the tail
//! of the chain. Created by the chain driver for each request and discarded
//! when the request/response cycle completes or fails.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::fault::barrier::Continuation;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Route parameters extracted before the chain runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteParams {
    /// Task id from the path, when the route carries one.
    pub id: Option<Uuid>,
}

/// Outbound response controller.
///
/// First write wins; later writes are dropped. Cloneable so the chain
/// driver, the handler, and the failure stage can all hold it.
#[derive(Clone, Default)]
pub struct Responder {
    slot: Arc<Mutex<Option<Response>>>,
}

impl Responder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the response unless one was already written.
    pub fn send(&self, response: Response) {
        let mut slot = self.slot.lock().expect("responder mutex poisoned");
        if slot.is_none() {
            *slot = Some(response);
        }
    }

    /// Take the response out, leaving the slot empty.
    pub fn take(&self) -> Option<Response> {
        self.slot.lock().expect("responder mutex poisoned").take()
    }

    pub fn is_sent(&self) -> bool {
        self.slot.lock().expect("responder mutex poisoned").is_some()
    }
}

/// The per-request bundle passed through the handling chain.
pub struct HandlingContext {
    state: AppState,
    request: Request<Body>,
    pub params: RouteParams,
    responder: Responder,
    next: Continuation,
}

impl HandlingContext {
    pub fn new(
        state: AppState,
        request: Request<Body>,
        params: RouteParams,
        responder: Responder,
        next: Continuation,
    ) -> Self {
        Self {
            state,
            request,
            params,
            responder,
            next,
        }
    }

    /// Shared application state (store handle, limits).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The inbound request descriptor.
    pub fn request(&self) -> &Request<Body> {
        &self.request
    }

    /// Clone the continuation handle to the next stage of the chain.
    pub fn continuation(&self) -> Continuation {
        self.next.clone()
    }

    /// Write a response through the controller. First write wins.
    pub fn respond(&self, response: impl IntoResponse) {
        self.responder.send(response.into_response());
    }

    /// Read and deserialize the request body.
    ///
    /// Suspends while the body streams in. An absent body reads as an empty
    /// JSON document.
    pub async fn read_json<T: DeserializeOwned>(&mut self) -> Result<T, ApiError> {
        let body = std::mem::replace(self.request.body_mut(), Body::empty());
        let bytes = axum::body::to_bytes(body, self.state.limits.max_body_bytes)
            .await
            .map_err(|_| ApiError::PayloadTooLarge)?;

        let bytes: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
        serde_json::from_slice(bytes)
            .map_err(|e| ApiError::BadRequest(format!("invalid request body: {}", e)))
    }
}
