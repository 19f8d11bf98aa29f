use std::env;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

const ENV_ENVIRONMENT: &str = "APP_ENV";
const ENV_HOST: &str = "APP_HOST";
const ENV_PORT: &str = "APP_PORT";
const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{} must be a u16, got '{value}'", ENV_PORT)]
    InvalidPort { value: String },
    #[error("{} must be an IP address or 'localhost'", ENV_HOST)]
    InvalidHost {
        #[source]
        source: AddrParseError,
    },
}

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn detect(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("prod") => Self::Production,
            Some(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            Some(value) if value.eq_ignore_ascii_case("test") => Self::Test,
            Some(value) if value.eq_ignore_ascii_case("ci") => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the marketplace service, assembled from the
/// process environment (a `.env` file is honored when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::detect(env::var(ENV_ENVIRONMENT).ok()),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig::from_env(),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env::var(ENV_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var(ENV_PORT) {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    fn from_env() -> Self {
        Self {
            log_level: env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}
