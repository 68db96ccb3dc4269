use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::analysis::{AnalysisSettings, Lambda, MAX_SWEEP_DIVISIONS};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let analysis = load_analysis_settings()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis,
        })
    }
}

fn load_analysis_settings() -> Result<AnalysisSettings, ConfigError> {
    let defaults = AnalysisSettings::default();

    let default_lambda = match env::var("WASPAS_LAMBDA") {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidLambda { value: raw.clone() })?;
            Lambda::new(value).map_err(|_| ConfigError::InvalidLambda { value: raw })?
        }
        Err(_) => defaults.default_lambda,
    };

    let sweep_divisions = match env::var("WASPAS_SWEEP_DIVISIONS") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(divisions) if (1..=MAX_SWEEP_DIVISIONS).contains(&divisions) => divisions,
            _ => return Err(ConfigError::InvalidSweepDivisions { value: raw }),
        },
        Err(_) => defaults.sweep_divisions,
    };

    let cache_capacity = match env::var("WASPAS_CACHE_CAPACITY") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => capacity,
            _ => return Err(ConfigError::InvalidCacheCapacity { value: raw }),
        },
        Err(_) => defaults.cache_capacity,
    };

    Ok(AnalysisSettings {
        default_lambda,
        sweep_divisions,
        cache_capacity,
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log filter for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLambda { value: String },
    InvalidSweepDivisions { value: String },
    InvalidCacheCapacity { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLambda { value } => {
                write!(f, "WASPAS_LAMBDA must be a number within [0, 1], got '{value}'")
            }
            ConfigError::InvalidSweepDivisions { value } => {
                write!(
                    f,
                    "WASPAS_SWEEP_DIVISIONS must be an integer within [1, {MAX_SWEEP_DIVISIONS}], got '{value}'"
                )
            }
            ConfigError::InvalidCacheCapacity { value } => {
                write!(
                    f,
                    "WASPAS_CACHE_CAPACITY must be a positive integer, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLambda { .. }
            | ConfigError::InvalidSweepDivisions { .. }
            | ConfigError::InvalidCacheCapacity { .. } => None,
        }
    }
}
