use crate::engine::EngineLimits;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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
    pub analysis: AnalysisConfig,
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

        let defaults = AnalysisConfig::default();
        let analysis = AnalysisConfig {
            dictionary_path: env::var("APP_DICTIONARY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dictionary_path),
            min_input_chars: numeric_var("APP_MIN_INPUT_CHARS", defaults.min_input_chars)?,
            max_input_chars: numeric_var("APP_MAX_INPUT_CHARS", defaults.max_input_chars)?,
            report_limit: numeric_var("APP_REPORT_LIMIT", defaults.report_limit)?,
            response_char_limit: numeric_var(
                "APP_RESPONSE_CHAR_LIMIT",
                defaults.response_char_limit,
            )?,
            rule_budget_ms: numeric_var("APP_RULE_BUDGET_MS", defaults.rule_budget_ms)?,
        };

        if analysis.rule_budget_ms == 0 {
            return Err(ConfigError::ZeroRuleBudget);
        }

        if analysis.max_input_chars < analysis.min_input_chars {
            return Err(ConfigError::InputBounds {
                min: analysis.min_input_chars,
                max: analysis.max_input_chars,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis,
        })
    }
}

fn numeric_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Dictionary location and the bounds hosts enforce around each analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub dictionary_path: PathBuf,
    pub min_input_chars: usize,
    pub max_input_chars: usize,
    pub report_limit: usize,
    pub response_char_limit: usize,
    pub rule_budget_ms: u64,
}

impl AnalysisConfig {
    pub fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            rule_budget: Duration::from_millis(self.rule_budget_ms),
            ..EngineLimits::default()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("dictionary.csv"),
            min_input_chars: 10,
            max_input_chars: 20_000,
            report_limit: 8,
            response_char_limit: 3_800,
            rule_budget_ms: 250,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    InputBounds { min: usize, max: usize },
    ZeroRuleBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer (found '{value}')")
            }
            ConfigError::InputBounds { min, max } => write!(
                f,
                "APP_MAX_INPUT_CHARS ({max}) must not be below APP_MIN_INPUT_CHARS ({min})"
            ),
            ConfigError::ZeroRuleBudget => write!(
                f,
                "APP_RULE_BUDGET_MS must be at least 1; a zero budget disables every rule"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InputBounds { .. }
            | ConfigError::ZeroRuleBudget => None,
        }
    }
}
