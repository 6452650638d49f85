//! Core library containing the route handlers, pagination and request gates
//! for the REST demo server.

pub mod config;
pub mod error;
pub mod extractors;
pub mod gates;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod store;

pub use crate::config::AppConfig;
pub use error::{AppError, Result};
pub use gates::{Gate, GateChain, GateContext, GateOutcome, GateResponse};
pub use handlers::routes::create_routes;
pub use pagination::{resolve, PaginationRequest};
pub use store::{UserRecord, UserStore};

use crate::config::LoginConfig;
use axum::{extract::Request, Router, ServiceExt};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::normalize_path::NormalizePath;
use tracing::info;

/// The router behind a layer that strips trailing slashes before routing, so
/// `/users/` and `/users` reach the same handler.
pub type App = NormalizePath<Router>;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub users: UserStore,
    pub login: LoginConfig,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            app_name: "REST Demo Server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            users: UserStore::new(),
            login: config.login.clone(),
            started_at: chrono::Utc::now(),
        }
    }
}

pub fn create_app(state: AppState) -> App {
    create_app_with_config(state, AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: AppConfig) -> App {
    let mut router = Router::new()
        .merge(create_routes(&config.gates))
        .fallback(handlers::routes::handle_not_found);

    router = router.layer(middleware::cors::cors_layer_from_config(
        &config.cors,
        &config.gates,
    ));

    router = middleware::logging::with_request_logging(router, &config.logging);

    NormalizePath::trim_trailing_slash(router.with_state(state))
}

pub async fn run_server(app: App, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
