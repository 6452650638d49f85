//! CORS (Cross-Origin Resource Sharing) middleware configuration

use crate::config::{CorsConfig, GateConfig};
use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Builds the CORS layer. The admin marker header named in `gates` is always
/// allowed, so browsers can reach the gated routes.
pub fn cors_layer_from_config(config: &CorsConfig, gates: &GateConfig) -> CorsLayer {
    if config.permissive {
        return cors_layer_permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let mut headers = vec![
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-requested-with"),
    ];
    match HeaderName::try_from(gates.admin_header.as_str()) {
        Ok(name) => headers.push(name),
        Err(_) => tracing::warn!("Ignoring invalid admin header for CORS: {}", gates.admin_header),
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(headers)
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

pub fn cors_layer_permissive() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(3600))
}
