//! Server-side string rendering

use crate::{
    error::{AppError, Result},
    extractors::QueryParams,
};
use axum::response::{Html, IntoResponse};
use tracing::info;

const INDEX_TEMPLATE: &str = "<!DOCTYPE html>\n<body>{{foo}}</body>\n</html>\n";

pub async fn handle_render(query: QueryParams) -> Result<impl IntoResponse> {
    let foo = query.get("foo");
    info!("GET /render - foo: {:?}", foo);

    match foo.filter(|foo| !foo.is_empty()) {
        Some(foo) => Ok(format!("foo: {}", foo)),
        None => Err(AppError::BadRequest("Missing query parameter: foo".to_string())),
    }
}

pub async fn handle_html(query: QueryParams) -> impl IntoResponse {
    let foo = query.get("foo");
    info!("GET /html - foo: {:?}", foo);

    Html(render_index(foo.unwrap_or("")))
}

pub fn render_index(foo: &str) -> String {
    INDEX_TEMPLATE.replace("{{foo}}", &escape_html(foo))
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
