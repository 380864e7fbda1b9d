//! Dashboard configuration
//!
//! Loaded from `ANS_DASHBOARD_*` environment variables, with defaults for
//! local development.
//!
//! # Example
//!
//! ```no_run
//! use ans_dashboard::config::DashboardConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DashboardConfig::from_env()?;
//! println!("API: {}/api", config.api_origin);
//! println!("Page size: {}", config.page_size);
//! # Ok(())
//! # }
//! ```

use ans_dashboard_api::{ApiClientConfig, Locale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Backend origin variable
pub const ENV_API_ORIGIN: &str = "ANS_DASHBOARD_API_ORIGIN";
/// Request timeout variable, in seconds
pub const ENV_TIMEOUT_SECS: &str = "ANS_DASHBOARD_TIMEOUT_SECS";
/// List page size variable
pub const ENV_PAGE_SIZE: &str = "ANS_DASHBOARD_PAGE_SIZE";
/// Message language variable
pub const ENV_LOCALE: &str = "ANS_DASHBOARD_LOCALE";
/// Deployment environment variable
pub const ENV_ENVIRONMENT: &str = "ANS_DASHBOARD_ENV";

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid environment value
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
    /// A variable could not be parsed
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
}

impl Environment {
    /// Get environment from string
    ///
    /// # Errors
    ///
    /// Returns error if environment string is invalid
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }

    /// Check if this is production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Backend origin, without the `/api` prefix
    pub api_origin: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Page size of the operator list
    pub page_size: u32,
    /// Language of user-facing messages
    pub locale: Locale,
}

impl DashboardConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a variable is malformed or the result is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from any variable source
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is malformed or the result is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ENVIRONMENT) {
            config.environment = Environment::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_API_ORIGIN) {
            config.api_origin = value.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_PAGE_SIZE) {
            config.page_size = parse_number(ENV_PAGE_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_LOCALE) {
            config.locale = value.parse().map_err(|e| ConfigError::InvalidValue {
                var: ENV_LOCALE,
                value: value.clone(),
                reason: format!("{e}"),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if any value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_origin.starts_with("http://") || self.api_origin.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api_origin must start with http:// or https://, got {:?}",
                self.api_origin
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("timeout_secs must be > 0".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::ValidationError(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP client settings derived from this configuration
    #[must_use]
    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig::new(self.api_origin.clone())
            .with_timeout(self.timeout())
            .with_locale(self.locale)
    }

    /// Log filter used when `RUST_LOG` is not set
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => {
                "ans_dashboard=debug,operadoras=debug,ans_dashboard_api=debug,ans_dashboard_runtime=info"
            },
            Environment::Production => "ans_dashboard=info,operadoras=info,ans_dashboard_api=info",
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            api_origin: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            page_size: 10,
            locale: Locale::PtBr,
        }
    }
}

fn parse_number<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
