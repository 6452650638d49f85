//! Request and response models

use crate::pagination::parse_leading_int;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the `/` routes. `foo` is kept untyped so numbers and numeric
/// strings are both accepted; an absent `foo` is omitted when echoed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foo: Option<Value>,
}

impl FooPayload {
    pub fn new(foo: impl Into<Value>) -> Self {
        Self {
            foo: Some(foo.into()),
        }
    }

    /// Integer reading of `foo`: numbers are truncated, strings use their
    /// leading integer, anything else has none.
    pub fn foo_as_int(&self) -> Option<i64> {
        match self.foo.as_ref()? {
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(text) => parse_leading_int(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
