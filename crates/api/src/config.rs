//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FLEXILEARN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `FLEXILEARN_HOST` - Bind address (default: 127.0.0.1)
//! - `FLEXILEARN_PORT` - Listen port (falls back to `PORT`, default: 5001)
//! - `FLEXILEARN_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `FLEXILEARN_DB_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 10)
//! - `FLEXILEARN_CORS_ORIGINS` - Comma-separated allowed origins (default: any origin)
//! - `FLEXILEARN_PASSWORD_STORAGE` - `argon2` (default) or `plaintext`
//! - `FLEXILEARN_SELLER_DUPLICATE_CHECK` - `users` (default) or `sellers`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How new passwords are written to `users.password`.
///
/// Login accepts both stored forms regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordStorage {
    /// Argon2id PHC strings.
    #[default]
    Argon2,
    /// Verbatim plaintext, for deployments that share the table with the
    /// previous system.
    LegacyPlaintext,
}

impl FromStr for PasswordStorage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Self::Argon2),
            "plaintext" | "legacy" => Ok(Self::LegacyPlaintext),
            other => Err(format!("expected 'argon2' or 'plaintext', got '{other}'")),
        }
    }
}

/// Which table the seller registration duplicate check reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SellerDuplicateCheck {
    /// Look the email up in `users` (long-standing behaviour).
    #[default]
    UserTable,
    /// Look the email up in `sellers`.
    SellerTable,
}

impl FromStr for SellerDuplicateCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(Self::UserTable),
            "sellers" | "seller" => Ok(Self::SellerTable),
            other => Err(format!("expected 'users' or 'sellers', got '{other}'")),
        }
    }
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Connection pool settings
    pub pool: PoolConfig,
    /// Allowed CORS origins; `None` allows any origin
    pub cors_origins: Option<Vec<String>>,
    /// Password storage policy for new accounts
    pub password_storage: PasswordStorage,
    /// Table consulted for duplicate seller emails
    pub seller_duplicate_check: SellerDuplicateCheck,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Connection pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// How long a query waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_url = env
            .first_of(&["FLEXILEARN_DATABASE_URL", "DATABASE_URL"])
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("FLEXILEARN_DATABASE_URL".to_string()))?;

        let host = env.parse_or("FLEXILEARN_HOST", "127.0.0.1")?;

        let port = match env.first_of(&["FLEXILEARN_PORT", "PORT"]) {
            Some(raw) => parse_value("FLEXILEARN_PORT", &raw)?,
            None => 5001,
        };

        let max_connections: u32 = env.parse_or("FLEXILEARN_DB_MAX_CONNECTIONS", "10")?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FLEXILEARN_DB_MAX_CONNECTIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let acquire_timeout_secs: u64 = env.parse_or("FLEXILEARN_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

        let cors_origins = env.get("FLEXILEARN_CORS_ORIGINS").and_then(|raw| {
            let origins: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
            (!origins.is_empty()).then_some(origins)
        });

        Ok(Self {
            database_url,
            host,
            port,
            pool: PoolConfig {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            cors_origins,
            password_storage: env.parse_or("FLEXILEARN_PASSWORD_STORAGE", "argon2")?,
            seller_duplicate_check: env.parse_or("FLEXILEARN_SELLER_DUPLICATE_CHECK", "users")?,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Wrapper giving a key lookup the accessors the loader needs.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; empty values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get the first variable in `keys` that is set.
    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.get(key).unwrap_or_else(|| default.to_string());
        parse_value(key, &raw)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("FLEXILEARN_DATABASE_URL", "postgres://localhost/flexilearn")]).unwrap();

        assert_eq!(
            config.database_url.expose_secret(),
            "postgres://localhost/flexilearn"
        );
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5001");
        assert_eq!(config.pool, PoolConfig::default());
        assert_eq!(config.cors_origins, None);
        assert_eq!(config.password_storage, PasswordStorage::Argon2);
        assert_eq!(
            config.seller_duplicate_check,
            SellerDuplicateCheck::UserTable
        );
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "FLEXILEARN_DATABASE_URL"));
    }

    #[test]
    fn test_generic_fallbacks() {
        let config = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.database_url.expose_secret(), "postgres://fly/db");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_prefixed_port_wins_over_generic() {
        let config = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("PORT", "8080"),
            ("FLEXILEARN_PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("FLEXILEARN_PORT", "not-a-port"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("FLEXILEARN_DB_MAX_CONNECTIONS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FLEXILEARN_DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn test_cors_origins_list() {
        let config = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            (
                "FLEXILEARN_CORS_ORIGINS",
                "https://flexilearn.app, http://localhost:3000,",
            ),
        ])
        .unwrap();

        assert_eq!(
            config.cors_origins,
            Some(vec![
                "https://flexilearn.app".to_string(),
                "http://localhost:3000".to_string()
            ])
        );
    }

    #[test]
    fn test_policy_switches() {
        let config = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("FLEXILEARN_PASSWORD_STORAGE", "plaintext"),
            ("FLEXILEARN_SELLER_DUPLICATE_CHECK", "Sellers"),
        ])
        .unwrap();

        assert_eq!(config.password_storage, PasswordStorage::LegacyPlaintext);
        assert_eq!(
            config.seller_duplicate_check,
            SellerDuplicateCheck::SellerTable
        );
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("FLEXILEARN_PASSWORD_STORAGE", "md5"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://user:hunter2@db/app")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
