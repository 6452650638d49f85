//! Route table and the status-code demo handlers

use crate::{
    config::GateConfig,
    error::{AppError, Result},
    extractors::{LenientBody, QueryParams},
    gates::GateChain,
    handlers::{health, users, views},
    middleware::gate::gated,
    models::request::{FooPayload, LoginForm},
    AppState,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, warn};

pub fn create_routes(gates: &GateConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handle_get_foo)
                .put(handle_put_foo)
                .post(handle_post_foo)
                .delete(handle_delete_foo),
        )
        .route("/error", get(handle_error).fallback(handle_method_not_allowed))
        .route("/auth", get(handle_auth))
        .route("/failed-login", get(handle_failed_login))
        .route("/redirect", get(handle_redirect))
        .route("/login", post(handle_login))
        .route("/query", get(handle_query))
        .route("/users", get(users::handle_list_users))
        .route(
            "/users/:id",
            get(users::handle_get_user).merge(gated(
                delete(users::handle_remove_user),
                GateChain::delete_protection(gates),
            )),
        )
        .route("/render", get(views::handle_render))
        .route("/html", get(views::handle_html))
        .route(
            "/middle",
            gated(get(handle_middle), GateChain::increment(gates)),
        )
        .route("/health", get(health::handle_health))
        .route("/live", get(health::handle_liveness))
}

async fn handle_get_foo() -> impl IntoResponse {
    info!("GET /");
    Json(json!({ "foo": 1 }))
}

async fn handle_put_foo(LenientBody(payload): LenientBody<FooPayload>) -> impl IntoResponse {
    let output = payload.foo_as_int().map(|foo| foo.saturating_add(1));

    info!("PUT / - foo: {:?} -> {:?}", payload.foo, output);

    Json(json!({ "foo": output }))
}

async fn handle_post_foo(LenientBody(payload): LenientBody<FooPayload>) -> impl IntoResponse {
    info!("POST / - foo: {:?}", payload.foo);

    (StatusCode::CREATED, Json(payload))
}

async fn handle_delete_foo() -> impl IntoResponse {
    info!("DELETE /");
    (StatusCode::ACCEPTED, Json(json!({ "foo": 0 })))
}

async fn handle_error() -> Result<()> {
    info!("GET /error");
    Err(AppError::InternalServerError)
}

async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn handle_auth() -> AppError {
    info!("GET /auth");
    AppError::Unauthorized
}

async fn handle_failed_login() -> AppError {
    info!("GET /failed-login");
    AppError::BadRequest("Invalid username or password".to_string())
}

async fn handle_redirect() -> impl IntoResponse {
    info!("GET /redirect");
    (StatusCode::FOUND, [(header::LOCATION, "/")])
}

async fn handle_login(
    State(state): State<AppState>,
    LenientBody(form): LenientBody<LoginForm>,
) -> Result<StatusCode> {
    info!("POST /login - username: {:?}", form.username);

    let valid = form.username.as_deref() == Some(state.login.username.as_str())
        && form.password.as_deref() == Some(state.login.password.as_str());

    if valid {
        Ok(StatusCode::OK)
    } else {
        warn!("Rejected login for {:?}", form.username);
        Err(AppError::BadRequest("Invalid username or password".to_string()))
    }
}

async fn handle_query(query: QueryParams) -> Result<StatusCode> {
    let first = query.get("firstParam");
    let second = query.get("secondParam");

    info!("GET /query - firstParam: {:?}, secondParam: {:?}", first, second);

    if first == Some("foo") && second == Some("bar") {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::BadRequest("Invalid query parameters".to_string()))
    }
}

/// Only reached when the increment gate lets the request through.
async fn handle_middle() -> impl IntoResponse {
    Json(json!({ "foo": 1 }))
}

pub async fn handle_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
