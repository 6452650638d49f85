//! Gates used by the demo routes.

use super::chain::{Gate, GateChain, GateContext, GateOutcome, GateResponse};
use crate::{config::GateConfig, pagination::parse_leading_int};
use axum::http::StatusCode;
use serde_json::{json, Map, Value};

pub const TOKEN_REQUIRED_MESSAGE: &str = "You need a token";
pub const ADMIN_REQUIRED_MESSAGE: &str = "You need to be an admin";
pub const DATA_REMOVED_MESSAGE: &str = "Your data was removed";

fn message(status: StatusCode, text: &str) -> GateOutcome {
    GateOutcome::ShortCircuit(GateResponse::new(status, json!({ "message": text })))
}

/// Rejects requests that carry no (or an empty) token query parameter.
#[derive(Debug, Clone)]
pub struct TokenGate {
    param: String,
    status: StatusCode,
}

impl TokenGate {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            status: StatusCode::OK,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl Gate for TokenGate {
    fn name(&self) -> &str {
        "token"
    }

    fn check(&self, ctx: &GateContext) -> GateOutcome {
        match ctx.query_param(&self.param) {
            Some(token) if !token.is_empty() => GateOutcome::Continue,
            _ => message(self.status, TOKEN_REQUIRED_MESSAGE),
        }
    }
}

/// Rejects requests without the admin marker header. Only presence is
/// checked; the header value is not interpreted.
#[derive(Debug, Clone)]
pub struct AdminGate {
    header: String,
    status: StatusCode,
}

impl AdminGate {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            status: StatusCode::OK,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl Gate for AdminGate {
    fn name(&self) -> &str {
        "admin"
    }

    fn check(&self, ctx: &GateContext) -> GateOutcome {
        match ctx.header(&self.header) {
            Some(marker) if !marker.as_bytes().is_empty() => GateOutcome::Continue,
            _ => message(self.status, ADMIN_REQUIRED_MESSAGE),
        }
    }
}

/// Answers `{<param>: n + 1}` when the query carries an integer `n`, and
/// lets the request through otherwise.
#[derive(Debug, Clone)]
pub struct IncrementGate {
    param: String,
}

impl IncrementGate {
    pub fn new(param: impl Into<String>) -> Self {
        Self { param: param.into() }
    }
}

impl Gate for IncrementGate {
    fn name(&self) -> &str {
        "increment"
    }

    fn check(&self, ctx: &GateContext) -> GateOutcome {
        match ctx.query_param(&self.param).and_then(parse_leading_int) {
            Some(value) => {
                let mut body = Map::new();
                body.insert(self.param.clone(), Value::from(value.saturating_add(1)));
                GateOutcome::ShortCircuit(GateResponse::ok(Value::Object(body)))
            }
            None => GateOutcome::Continue,
        }
    }
}

impl GateChain {
    /// Token check followed by admin check.
    pub fn delete_protection(config: &GateConfig) -> Self {
        let status = StatusCode::from_u16(config.rejection_status).unwrap_or(StatusCode::OK);

        GateChain::new()
            .with_gate(TokenGate::new(config.token_param.clone()).with_status(status))
            .with_gate(AdminGate::new(config.admin_header.clone()).with_status(status))
    }

    pub fn increment(config: &GateConfig) -> Self {
        GateChain::new().with_gate(IncrementGate::new(config.increment_param.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};
    use std::collections::HashMap;

    fn message_of(outcome: GateOutcome) -> Option<String> {
        match outcome {
            GateOutcome::ShortCircuit(response) => response.body["message"].as_str().map(String::from),
            GateOutcome::Continue => None,
        }
    }

    fn removal(chain: &GateChain, ctx: &GateContext) -> Value {
        match chain.run(ctx, |_| json!({ "message": DATA_REMOVED_MESSAGE })) {
            Ok(body) => body,
            Err(response) => response.body,
        }
    }

    #[test]
    fn test_token_gate() {
        let gate = TokenGate::new("token");
        assert_eq!(message_of(gate.check(&GateContext::default())).as_deref(), Some(TOKEN_REQUIRED_MESSAGE));

        let empty = GateContext::default().with_query_param("token", "");
        assert!(!gate.check(&empty).is_continue());

        let present = GateContext::default().with_query_param("token", "foo");
        assert!(gate.check(&present).is_continue());
    }

    #[test]
    fn test_admin_gate() {
        let gate = AdminGate::new("x-admin");
        assert_eq!(message_of(gate.check(&GateContext::default())).as_deref(), Some(ADMIN_REQUIRED_MESSAGE));

        let marked = GateContext::default().with_header("x-admin", "true");
        assert!(gate.check(&marked).is_continue());

        let any_value = GateContext::default().with_header("x-admin", "false");
        assert!(gate.check(&any_value).is_continue());

        let mut headers = HeaderMap::new();
        headers.insert("x-admin", HeaderValue::from_bytes(b"\xe9").unwrap());
        let non_ascii = GateContext::new(HashMap::new(), headers);
        assert!(gate.check(&non_ascii).is_continue());

        let mut headers = HeaderMap::new();
        headers.insert("x-admin", HeaderValue::from_static(""));
        let empty = GateContext::new(HashMap::new(), headers);
        assert!(!gate.check(&empty).is_continue());
    }

    #[test]
    fn test_delete_protection_precedence() {
        let chain = GateChain::delete_protection(&GateConfig::default());
        assert_eq!(chain.names(), vec!["token", "admin"]);

        let neither = GateContext::default();
        assert_eq!(removal(&chain, &neither), json!({ "message": "You need a token" }));

        let admin_only = GateContext::default().with_header("x-admin", "true");
        assert_eq!(removal(&chain, &admin_only), json!({ "message": "You need a token" }));

        let token_only = GateContext::default().with_query_param("token", "foo");
        assert_eq!(removal(&chain, &token_only), json!({ "message": "You need to be an admin" }));

        let both = GateContext::default()
            .with_query_param("token", "foo")
            .with_header("x-admin", "true");
        assert_eq!(removal(&chain, &both), json!({ "message": "Your data was removed" }));
    }

    #[test]
    fn test_rejection_status_defaults_to_ok() {
        let chain = GateChain::delete_protection(&GateConfig::default());
        match chain.evaluate(&GateContext::default()) {
            GateOutcome::ShortCircuit(response) => assert_eq!(response.status, StatusCode::OK),
            GateOutcome::Continue => panic!("expected short-circuit"),
        }
    }

    #[test]
    fn test_rejection_status_is_configurable() {
        let config = GateConfig {
            rejection_status: 403,
            ..GateConfig::default()
        };
        let chain = GateChain::delete_protection(&config);
        match chain.evaluate(&GateContext::default().with_query_param("token", "foo")) {
            GateOutcome::ShortCircuit(response) => {
                assert_eq!(response.status, StatusCode::FORBIDDEN);
                assert_eq!(response.body["message"], ADMIN_REQUIRED_MESSAGE);
            }
            GateOutcome::Continue => panic!("expected short-circuit"),
        }
    }

    #[test]
    fn test_increment_gate() {
        let chain = GateChain::increment(&GateConfig::default());

        let terminal = |_: &GateContext| json!({ "foo": 1 });
        assert_eq!(chain.run(&GateContext::default(), terminal), Ok(json!({ "foo": 1 })));

        let five = GateContext::default().with_query_param("foo", "5");
        assert_eq!(
            chain.run(&five, terminal),
            Err(GateResponse::ok(json!({ "foo": 6 })))
        );

        let negative = GateContext::default().with_query_param("foo", "-3");
        assert_eq!(
            chain.run(&negative, terminal),
            Err(GateResponse::ok(json!({ "foo": -2 })))
        );

        let not_a_number = GateContext::default().with_query_param("foo", "abc");
        assert_eq!(chain.run(&not_a_number, terminal), Ok(json!({ "foo": 1 })));
    }

    #[test]
    fn test_increment_saturates() {
        let gate = IncrementGate::new("foo");
        let ctx = GateContext::default().with_query_param("foo", "99999999999999999999");
        assert_eq!(
            gate.check(&ctx),
            GateOutcome::ShortCircuit(GateResponse::ok(json!({ "foo": i64::MAX })))
        );
    }
}
