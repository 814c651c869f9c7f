//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEV_JWT_SECRET, MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};
use crate::services::TokenConfig;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns a validation error if JWT_SECRET is missing in a release build
    /// or shorter than the minimum length.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::validation(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::builder(jwt_secret)
            .database_url(env::var("DATABASE_URL").ok())
            .jwt_expiration_hours(
                env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            )
            .server_host(env::var("SERVER_HOST").ok())
            .server_port(env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()))
            .build()
    }

    /// Start building a configuration with the given signing secret.
    pub fn builder(jwt_secret: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            jwt_secret: jwt_secret.into(),
            database_url: None,
            jwt_expiration_hours: None,
            server_host: None,
            server_port: None,
        }
    }

    /// Signing configuration for the token issuer.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(self.jwt_secret.clone(), self.jwt_expiration_hours)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Builder filling unset values with defaults.
pub struct ConfigBuilder {
    jwt_secret: String,
    database_url: Option<String>,
    jwt_expiration_hours: Option<i64>,
    server_host: Option<String>,
    server_port: Option<u16>,
}

impl ConfigBuilder {
    pub fn database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url;
        self
    }

    pub fn jwt_expiration_hours(mut self, hours: Option<i64>) -> Self {
        self.jwt_expiration_hours = hours;
        self
    }

    pub fn server_host(mut self, host: Option<String>) -> Self {
        self.server_host = host;
        self
    }

    pub fn server_port(mut self, port: Option<u16>) -> Self {
        self.server_port = port;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> AppResult<Config> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let jwt_expiration_hours = self
            .jwt_expiration_hours
            .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS);
        if jwt_expiration_hours <= 0 {
            return Err(AppError::validation(
                "JWT_EXPIRATION_HOURS must be a positive number of hours",
            ));
        }
        if jwt_expiration_hours > MAX_JWT_EXPIRATION_HOURS {
            return Err(AppError::validation(format!(
                "JWT_EXPIRATION_HOURS must not exceed {}",
                MAX_JWT_EXPIRATION_HOURS
            )));
        }

        Ok(Config {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: self.jwt_secret,
            jwt_expiration_hours,
            server_host: self
                .server_host
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_builder_applies_defaults() {
        let config = Config::builder(SECRET).build().unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.jwt_expiration_hours, DEFAULT_JWT_EXPIRATION_HOURS);
        assert_eq!(
            config.server_addr(),
            format!("{}:{}", DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT)
        );
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::builder("too-short").build();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_non_positive_expiration_rejected() {
        let result = Config::builder(SECRET).jwt_expiration_hours(Some(0)).build();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_oversized_expiration_rejected() {
        let result = Config::builder(SECRET)
            .jwt_expiration_hours(Some(3_000_000_000))
            .build();
        assert!(matches!(result, Err(AppError::Validation(_))));

        let config = Config::builder(SECRET)
            .jwt_expiration_hours(Some(MAX_JWT_EXPIRATION_HOURS))
            .build()
            .unwrap();
        assert_eq!(config.jwt_expiration_hours, MAX_JWT_EXPIRATION_HOURS);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::builder(SECRET).build().unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains(SECRET));
        assert!(debug.contains("[REDACTED]"));
    }
}
