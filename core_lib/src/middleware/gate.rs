//! Runs a [`GateChain`] in front of a route handler.

use crate::gates::{GateChain, GateContext, GateOutcome};
use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};

pub async fn gate_middleware(
    State(chain): State<GateChain>,
    request: Request,
    next: Next,
) -> Response {
    let ctx = GateContext::from_request(request.uri(), request.headers());

    match chain.evaluate(&ctx) {
        GateOutcome::Continue => next.run(request).await,
        GateOutcome::ShortCircuit(response) => {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                status = response.status.as_u16(),
                "request answered by gate"
            );
            response.into_response()
        }
    }
}

/// Wraps the handlers of `method_router` with `chain`. The method fallback is
/// left alone, so unmatched methods still get 405 instead of a gate answer.
pub fn gated<S>(method_router: MethodRouter<S>, chain: GateChain) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    method_router.route_layer(middleware::from_fn_with_state(chain, gate_middleware))
}
