//! Ordered request gates with short-circuiting.

use crate::extractors::QueryParams;
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::{collections::HashMap, fmt, sync::Arc};

/// Read-only view of a request handed to each gate.
#[derive(Debug, Clone, Default)]
pub struct GateContext {
    query: HashMap<String, String>,
    headers: HeaderMap,
}

impl GateContext {
    pub fn new(query: HashMap<String, String>, headers: HeaderMap) -> Self {
        Self { query, headers }
    }

    /// Builds a context from a request URI. A malformed query string yields
    /// no parameters rather than an error; a repeated key keeps its first value.
    pub fn from_request(uri: &Uri, headers: &HeaderMap) -> Self {
        Self::new(QueryParams::from_uri(uri).into_inner(), headers.clone())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Raw header value. Values that are not visible ASCII are still returned.
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GateResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl GateResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

impl IntoResponse for GateResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Continue,
    ShortCircuit(GateResponse),
}

impl GateOutcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, GateOutcome::Continue)
    }
}

pub trait Gate: Send + Sync {
    fn name(&self) -> &str;

    fn check(&self, ctx: &GateContext) -> GateOutcome;
}

/// Gates run in the order they were added. The first short-circuit wins and
/// nothing after it is consulted.
#[derive(Clone, Default)]
pub struct GateChain {
    gates: Vec<Arc<dyn Gate>>,
}

impl GateChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate<G: Gate + 'static>(mut self, gate: G) -> Self {
        self.gates.push(Arc::new(gate));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.gates.iter().map(|gate| gate.name()).collect()
    }

    pub fn evaluate(&self, ctx: &GateContext) -> GateOutcome {
        for gate in &self.gates {
            if let GateOutcome::ShortCircuit(response) = gate.check(ctx) {
                tracing::debug!(gate = gate.name(), status = response.status.as_u16(), "gate short-circuited");
                return GateOutcome::ShortCircuit(response);
            }
        }

        GateOutcome::Continue
    }

    /// Evaluates the chain and, if every gate passes, the terminal handler.
    pub fn run<T, F>(&self, ctx: &GateContext, terminal: F) -> Result<T, GateResponse>
    where
        F: FnOnce(&GateContext) -> T,
    {
        match self.evaluate(ctx) {
            GateOutcome::Continue => Ok(terminal(ctx)),
            GateOutcome::ShortCircuit(response) => Err(response),
        }
    }
}

impl fmt::Debug for GateChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateChain").field("gates", &self.names()).finish()
    }
}
