pub mod request;

pub use request::{FooPayload, LoginForm, MessageBody};
