//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SMTP_FROM,
    DEFAULT_SMTP_PORT, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Store DSN. `None` keeps the server up but fails every store-backed request.
    pub database_url: Option<String>,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub notify: NotifyConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("notify", &self.notify)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults around an explicit JWT secret.
    ///
    /// # Errors
    /// Returns a configuration error if the secret is too short.
    pub fn new(database_url: Option<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            notify: NotifyConfig::default(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set, store-backed requests will fail");
        }

        let mut config = match Self::new(database_url, jwt_secret) {
            Ok(config) => config,
            Err(e) => panic!("{}", e),
        };

        config.jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS);
        config.server_host =
            env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string());
        config.server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);
        config.notify = NotifyConfig::from_env();

        config
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Mail relay settings for booking notifications.
///
/// Notification is enabled only when both `smtp_host` and `recipient` are set.
#[derive(Clone, Default)]
pub struct NotifyConfig {
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    smtp_pass: Option<String>,
    pub smtp_from: String,
    pub recipient: Option<String>,
}

impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &"[REDACTED]")
            .field("smtp_from", &self.smtp_from)
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl NotifyConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok().filter(|v| !v.is_empty()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_pass: env::var("SMTP_PASS").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_SMTP_FROM.to_string()),
            recipient: env::var("NOTIFY_EMAIL").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Whether enough is configured to attempt delivery.
    pub fn is_configured(&self) -> bool {
        self.smtp_host.is_some() && self.recipient.is_some()
    }

    /// SMTP credentials, if both halves are present.
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.smtp_user, &self.smtp_pass) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::new(None, "short");
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new(
            Some("postgres://user:pw@localhost/db".to_string()),
            "a-very-long-secret-key-for-testing-123",
        )
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("pw@localhost"));
        assert!(!rendered.contains("a-very-long-secret"));
    }

    #[test]
    fn test_notify_disabled_by_default() {
        assert!(!NotifyConfig::default().is_configured());
    }
}
