//! The async fault barrier.
//!
//! Wraps a fallible request handler so that any failure it raises, whether
//! immediately or after a suspension point, is relayed to the next stage of
//! the handling chain instead of propagating uncaught. Centralizing failure
//! capture at registration time avoids a hand-written catch block in every
//! handler.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::fault::context::HandlingContext;
use crate::http::error::ApiError;

/// Failure value carried through the handling chain.
pub type Fault = ApiError;

/// Handle to the next stage of the handling chain.
///
/// Cloneable; all clones share one fired flag, so a failure is relayed at
/// most once per request no matter how many stages hold the handle.
#[derive(Clone)]
pub struct Continuation {
    relay: Arc<dyn Fn(Fault) + Send + Sync>,
    fired: Arc<AtomicBool>,
}

impl Continuation {
    pub fn new(relay: impl Fn(Fault) + Send + Sync + 'static) -> Self {
        Self {
            relay: Arc::new(relay),
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Hand a failure to the next stage. At most one invocation per request
    /// reaches the relay.
    pub fn invoke(&self, fault: Fault) {
        if self.fired.swap(true, Ordering::SeqCst) {
            tracing::warn!(error = %fault, "Continuation already fired for this request");
            return;
        }
        (self.relay)(fault);
    }

    /// Whether the failure relay has fired.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

/// Wrap a handler so its failures are relayed instead of propagating.
///
/// The produced handler has the same signature as the input and is
/// registrable in the same position. Its future always resolves `Ok(())`:
/// on success the wrapped handler's response side effects stand untouched;
/// on failure the context's continuation is invoked with the failure value.
/// Relay happens strictly after the wrapped handler's work settles.
pub fn fault_barrier<H, Fut>(
    handler: H,
) -> impl Fn(HandlingContext) -> BoxFuture<'static, Result<(), Fault>> + Clone + Send + Sync + 'static
where
    H: Fn(HandlingContext) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), Fault>> + Send + 'static,
{
    move |ctx: HandlingContext| {
        // A fresh continuation handle per invocation keeps concurrent
        // requests independent.
        let next = ctx.continuation();
        let work = handler(ctx);
        Box::pin(async move {
            if let Err(fault) = work.await {
                next.invoke(fault);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio::sync::oneshot;

    use crate::config::{LimitConfig, StoreConfig};
    use crate::fault::context::{Responder, RouteParams};
    use crate::http::server::AppState;
    use crate::store::DocumentStore;

    async fn test_state() -> AppState {
        let store = DocumentStore::connect(&StoreConfig::default()).await.unwrap();
        AppState {
            store: Arc::new(store),
            limits: LimitConfig::default(),
        }
    }

    fn test_context(state: AppState) -> (HandlingContext, Responder, Arc<Mutex<Vec<Fault>>>) {
        let responder = Responder::new();
        let relays: Arc<Mutex<Vec<Fault>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = relays.clone();
        let next = Continuation::new(move |fault| sink.lock().unwrap().push(fault));
        let request = Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();
        let ctx = HandlingContext::new(
            state,
            request,
            RouteParams::default(),
            responder.clone(),
            next,
        );
        (ctx, responder, relays)
    }

    #[tokio::test]
    async fn success_passes_through_without_relay() {
        let state = test_state().await;
        let (ctx, responder, relays) = test_context(state);

        let guarded = fault_barrier(|ctx: HandlingContext| async move {
            ctx.respond((StatusCode::OK, "done"));
            Ok(())
        });

        guarded(ctx).await.unwrap();

        let response = responder.take().expect("handler should have responded");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(relays.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn immediate_failure_is_relayed_once() {
        let state = test_state().await;
        let (ctx, responder, relays) = test_context(state);

        let guarded = fault_barrier(|_ctx: HandlingContext| async move {
            Err(Fault::BadRequest("boom".to_string()))
        });

        guarded(ctx).await.unwrap();

        let relayed = relays.lock().unwrap();
        assert_eq!(relayed.len(), 1);
        assert_eq!(relayed[0].to_string(), "boom");
        assert!(!responder.is_sent());
    }

    #[tokio::test]
    async fn relay_waits_for_the_suspended_operation_to_settle() {
        let state = test_state().await;
        let (ctx, _responder, relays) = test_context(state);

        let (release, gate) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some(gate)));

        let guarded = fault_barrier(move |ctx: HandlingContext| {
            let gate = gate.clone();
            async move {
                let gate = gate.lock().unwrap().take().unwrap();
                let _ = gate.await;
                drop(ctx);
                Err(Fault::BadRequest("late failure".to_string()))
            }
        });

        let running = tokio::spawn(guarded(ctx));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(
            relays.lock().unwrap().is_empty(),
            "continuation must not fire before the operation settles"
        );

        release.send(()).unwrap();
        running.await.unwrap().unwrap();

        let relayed = relays.lock().unwrap();
        assert_eq!(relayed.len(), 1);
        assert_eq!(relayed[0].to_string(), "late failure");
    }

    #[tokio::test]
    async fn continuation_fires_at_most_once() {
        let count = Arc::new(Mutex::new(0u32));
        let sink = count.clone();
        let next = Continuation::new(move |_| *sink.lock().unwrap() += 1);

        next.invoke(Fault::BadRequest("first".to_string()));
        next.invoke(Fault::BadRequest("second".to_string()));

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(next.fired());
    }

    #[tokio::test]
    async fn handler_relay_and_barrier_relay_do_not_double_fire() {
        let state = test_state().await;
        let (ctx, _responder, relays) = test_context(state);

        // Handler hands the failure off itself and then also returns Err;
        // the barrier's relay must be dropped by the shared fired flag.
        let guarded = fault_barrier(|ctx: HandlingContext| async move {
            ctx.continuation()
                .invoke(Fault::BadRequest("from handler".to_string()));
            Err(Fault::BadRequest("from return".to_string()))
        });

        guarded(ctx).await.unwrap();

        let relayed = relays.lock().unwrap();
        assert_eq!(relayed.len(), 1);
        assert_eq!(relayed[0].to_string(), "from handler");
    }

    #[tokio::test]
    async fn concurrent_invocations_are_independent() {
        let state = test_state().await;
        let (failing_ctx, _, failing_relays) = test_context(state.clone());
        let (ok_ctx, ok_responder, ok_relays) = test_context(state);

        let failing = fault_barrier(|_ctx: HandlingContext| async move {
            Err(Fault::BadRequest("only mine".to_string()))
        });
        let succeeding = fault_barrier(|ctx: HandlingContext| async move {
            ctx.respond((StatusCode::OK, "fine"));
            Ok(())
        });

        let (a, b) = tokio::join!(failing(failing_ctx), succeeding(ok_ctx));
        a.unwrap();
        b.unwrap();

        assert_eq!(failing_relays.lock().unwrap().len(), 1);
        assert!(ok_relays.lock().unwrap().is_empty());
        assert!(ok_responder.is_sent());
    }
}
