//! Booking API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults. Production deployments MUST set `JWT_SECRET`,
//! the SMTP credentials, and `PAYMENT_SECRET_KEY`.

use serde::{Deserialize, Serialize};
use std::env;

use haven_core::SESSION_LIFETIME_DAYS;

/// Booking API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file
    pub database_path: String,

    /// JWT secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token lifetime in days
    pub session_lifetime_days: i64,

    /// SMTP server host
    pub smtp_host: String,

    /// SMTP server port
    pub smtp_port: u16,

    /// SMTP authentication username
    pub smtp_username: String,

    /// SMTP authentication password
    pub smtp_password: String,

    /// Sender address for outbound notifications
    pub smtp_from: String,

    /// Payment processor secret key
    pub payment_secret_key: String,

    /// Payment processor API base URL
    pub payment_api_base: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = AppConfig {
            database_path: env::var("HAVEN_DATABASE_PATH")
                .unwrap_or_else(|_| "haven.db".to_string()),

            jwt_secret: env::var("JWT_SECRET")
                // In production, this MUST be set via environment variable
                .unwrap_or_else(|_| "haven-dev-secret-change-in-production".to_string()),

            session_lifetime_days: env::var("SESSION_LIFETIME_DAYS")
                .unwrap_or_else(|_| SESSION_LIFETIME_DAYS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_LIFETIME_DAYS".to_string()))?,

            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),

            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SMTP_PORT".to_string()))?,

            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),

            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),

            smtp_from: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Haven <noreply@haven.example>".to_string()),

            payment_secret_key: env::var("PAYMENT_SECRET_KEY").unwrap_or_default(),

            payment_api_base: env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
