//! Body extractor that accepts JSON or url-encoded forms and falls back to a
//! default value instead of rejecting

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;
use std::convert::Infallible;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Reads the body as a url-encoded form when the request says so, and as
/// JSON otherwise. A missing, mistyped or malformed body yields
/// `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct LenientBody<T>(pub T);

fn is_form(req: &Request<Body>) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

#[async_trait]
impl<T, S> FromRequest<S> for LenientBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = if is_form(&req) {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|rejection| rejection.body_text())
        };

        match parsed {
            Ok(value) => Ok(LenientBody(value)),
            Err(reason) => {
                tracing::debug!("Using default body: {}", reason);
                Ok(LenientBody(T::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Payload {
        foo: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = axum::http::Request::builder().method("PUT").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Payload {
        let LenientBody(payload) = LenientBody::<Payload>::from_request(request(content_type, body), &())
            .await
            .unwrap();
        payload
    }

    #[tokio::test]
    async fn test_json_body() {
        let payload = extract(Some("application/json"), r#"{"foo":"3"}"#).await;
        assert_eq!(payload.foo.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_form_body() {
        let payload = extract(Some("application/x-www-form-urlencoded"), "foo=1").await;
        assert_eq!(payload.foo.as_deref(), Some("1"));

        let payload = extract(Some("application/x-www-form-urlencoded; charset=UTF-8"), "foo=a+b").await;
        assert_eq!(payload.foo.as_deref(), Some("a b"));
    }

    #[tokio::test]
    async fn test_missing_content_type_uses_default() {
        assert_eq!(extract(None, "").await, Payload::default());
        assert_eq!(extract(Some("text/plain"), "foo=1").await, Payload::default());
    }

    #[tokio::test]
    async fn test_malformed_body_uses_default() {
        assert_eq!(extract(Some("application/json"), "{not json").await, Payload::default());
        assert_eq!(
            extract(Some("application/x-www-form-urlencoded"), "foo=1&foo=2").await,
            Payload::default()
        );
    }
}
