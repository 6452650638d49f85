use axum::http::{HeaderName, StatusCode};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_ENV: &str = "APP_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub gates: GateConfig,
    pub login: LoginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub enable_request_logging: bool,
    pub log_headers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub permissive: bool,
}

/// Names and response policy for the request gates.
///
/// `rejection_status` is the status attached to a short-circuited gate
/// response. It defaults to 200 so the message body is the only signal
/// telling a rejection apart from the terminal success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub token_param: String,
    pub admin_header: String,
    pub increment_param: String,
    pub rejection_status: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
            gates: GateConfig::default(),
            login: LoginConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_request_logging: true,
            log_headers: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            permissive: false,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            token_param: "token".to_string(),
            admin_header: "x-admin".to_string(),
            increment_param: "foo".to_string(),
            rejection_status: 200,
        }
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            username: "foo".to_string(),
            password: "bar".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `config.toml` (or the file named by
    /// `APP_CONFIG_FILE`), then `APP_*` environment variables.
    pub fn load() -> crate::Result<Self> {
        let path = std::env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });

        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // APP_SERVER__PORT, APP_GATES__ADMIN_HEADER, ...
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.gates.token_param.trim().is_empty() {
            return Err(ConfigError::Message(
                "Token parameter name cannot be empty".to_string(),
            ));
        }

        if self.gates.increment_param.trim().is_empty() {
            return Err(ConfigError::Message(
                "Increment parameter name cannot be empty".to_string(),
            ));
        }

        if HeaderName::try_from(self.gates.admin_header.as_str()).is_err() {
            return Err(ConfigError::Message(format!(
                "Invalid admin header name: {:?}",
                self.gates.admin_header
            )));
        }

        if StatusCode::from_u16(self.gates.rejection_status).is_err() {
            return Err(ConfigError::Message(format!(
                "Invalid gate rejection status: {}",
                self.gates.rejection_status
            )));
        }

        if self.login.username.is_empty() || self.login.password.is_empty() {
            return Err(ConfigError::Message(
                "Login credentials cannot be empty".to_string(),
            ));
        }

        if self.cors.permissive {
            tracing::warn!("Permissive CORS enabled - any origin is allowed");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
