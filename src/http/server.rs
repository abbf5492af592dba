//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with all task routes
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Drive each request through the fault barrier chain
//! - Serve with graceful shutdown
//!
//! Every route handler is registered behind the fault barrier: the chain
//! driver builds a `HandlingContext` per request, runs the barrier-wrapped
//! handler, and takes whatever the handler or the failure stage wrote to
//! the responder.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::{AppConfig, LimitConfig};
use crate::fault::{fault_barrier, Continuation, Fault, HandlingContext, Responder, RouteParams};
use crate::http::error;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::store::DocumentStore;
use crate::tasks::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub limits: LimitConfig,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store handle.
    pub fn new(config: AppConfig, store: Arc<DocumentStore>) -> Self {
        let state = AppState {
            store,
            limits: config.limits,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/v1/tasks",
                get(list_tasks_route).post(create_task_route),
            )
            .route(
                "/api/v1/tasks/{id}",
                get(get_task_route)
                    .patch(update_task_route)
                    .delete(delete_task_route),
            )
            .fallback(not_found)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signals::shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Drive one request through the barrier-guarded handling chain.
///
/// Builds the per-request context, awaits the barrier-produced handler, and
/// takes the response the handler or the failure stage wrote. A handler that
/// finishes without responding is itself a server fault.
async fn run_chain<H, Fut>(
    state: AppState,
    params: RouteParams,
    request: Request,
    handler: H,
) -> Response
where
    H: Fn(HandlingContext) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Fault>> + Send + 'static,
{
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let responder = Responder::new();
    let tail = {
        let responder = responder.clone();
        Continuation::new(move |fault| responder.send(error::fault_response(&fault)))
    };

    let ctx = HandlingContext::new(state, request, params, responder.clone(), tail);
    let guarded = fault_barrier(handler);
    // The barrier never fails; failures went through the continuation.
    let _ = guarded(ctx).await;

    let response = responder.take().unwrap_or_else(|| {
        tracing::error!(
            request_id = %request_id,
            path = %path,
            "Handler completed without writing a response"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "msg": "Something went wrong, please try again" })),
        )
            .into_response()
    });

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

async fn list_tasks_route(State(state): State<AppState>, request: Request) -> Response {
    run_chain(state, RouteParams::default(), request, handlers::list_tasks).await
}

async fn create_task_route(State(state): State<AppState>, request: Request) -> Response {
    run_chain(state, RouteParams::default(), request, handlers::create_task).await
}

async fn get_task_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Request,
) -> Response {
    run_chain(state, RouteParams { id: Some(id) }, request, handlers::get_task).await
}

async fn update_task_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Request,
) -> Response {
    run_chain(
        state,
        RouteParams { id: Some(id) },
        request,
        handlers::update_task,
    )
    .await
}

async fn delete_task_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Request,
) -> Response {
    run_chain(
        state,
        RouteParams { id: Some(id) },
        request,
        handlers::delete_task,
    )
    .await
}

/// Tail of the routing table: anything unmatched is answered here.
async fn not_found(request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    tracing::debug!(path = %request.uri().path(), "No route matched");

    let response = (StatusCode::NOT_FOUND, "Route does not exist").into_response();
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
