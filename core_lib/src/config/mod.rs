pub mod settings;

pub use settings::{AppConfig, CorsConfig, GateConfig, LoggingConfig, LoginConfig, ServerConfig};
