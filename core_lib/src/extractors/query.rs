//! Query-string extractor that reads each parameter on its own

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use std::{collections::HashMap, convert::Infallible};

/// Query parameters keyed by name. A repeated key keeps its first value, and
/// a malformed query string yields no parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(pub HashMap<String, String>);

impl QueryParams {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let mut params = HashMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            params.entry(name).or_insert(value);
        }

        QueryParams(params)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(QueryParams::from_uri(&parts.uri))
    }
}
