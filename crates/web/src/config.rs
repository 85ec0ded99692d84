//! Web configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `WASTETRACK_DATABASE_URL` - `PostgreSQL` connection string for the session
//!   store shared with the login service (required; falls back to `DATABASE_URL`)
//!
//! Optional:
//!
//! - `WASTETRACK_HOST` - Bind address (default: 127.0.0.1)
//! - `WASTETRACK_PORT` - Listen port (default: 3000)
//! - `WASTETRACK_BASE_URL` - Public URL (default: <http://localhost:3000>);
//!   an `https://` URL turns on secure cookies
//! - `WASTETRACK_STATIC_DIR` - Static assets directory (default: crates/web/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// `PostgreSQL` URL of the session store (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            database_url: SecretString::from("postgres://localhost/wastetrack".to_string()),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            static_dir: PathBuf::from("crates/web/static"),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a variable is
    /// present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a variable is
    /// present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let database_url = lookup("WASTETRACK_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.is_empty())
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("WASTETRACK_DATABASE_URL".to_string()))?;

        let host = parse_or(&lookup, "WASTETRACK_HOST", defaults.host)?;
        let port = parse_or(&lookup, "WASTETRACK_PORT", defaults.port)?;
        let base_url = lookup("WASTETRACK_BASE_URL").unwrap_or(defaults.base_url);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "WASTETRACK_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }
        let static_dir = lookup("WASTETRACK_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        let sentry_sample_rate =
            parse_rate(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?;
        let sentry_traces_sample_rate = parse_rate(
            &lookup,
            "SENTRY_TRACES_SAMPLE_RATE",
            defaults.sentry_traces_sample_rate,
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    const DATABASE_URL: &str = "postgres://wastetrack@db.internal/sessions";

    fn load_exact(vars: &[(&str, &str)]) -> Result<WebConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        WebConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn load(vars: &[(&str, &str)]) -> Result<WebConfig, ConfigError> {
        let mut all = vec![("WASTETRACK_DATABASE_URL", DATABASE_URL)];
        all.extend_from_slice(vars);
        load_exact(&all)
    }

    #[test]
    fn test_database_url_is_required() {
        let err = load_exact(&[]).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingEnvVar(ref key) if key == "WASTETRACK_DATABASE_URL")
        );
        assert!(load_exact(&[("WASTETRACK_DATABASE_URL", "")]).is_err());
    }

    #[test]
    fn test_database_url_falls_back_to_generic_var() {
        let config = load_exact(&[("DATABASE_URL", "postgres://fly/attach")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fly/attach");

        let config = load_exact(&[
            ("WASTETRACK_DATABASE_URL", DATABASE_URL),
            ("DATABASE_URL", "postgres://fly/attach"),
        ])
        .unwrap();
        assert_eq!(config.database_url.expose_secret(), DATABASE_URL);
    }

    #[test]
    fn test_database_url_is_redacted_in_debug() {
        let config = load(&[]).unwrap();
        assert!(!format!("{config:?}").contains("db.internal"));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.is_secure());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("WASTETRACK_HOST", "0.0.0.0"),
            ("WASTETRACK_PORT", "8080"),
            ("WASTETRACK_BASE_URL", "https://wastetrack.example"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("WASTETRACK_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "WASTETRACK_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(load(&[("WASTETRACK_HOST", "localhost")]).is_err());
    }

    #[test]
    fn test_base_url_needs_scheme() {
        assert!(load(&[("WASTETRACK_BASE_URL", "wastetrack.example")]).is_err());
    }

    #[test]
    fn test_sample_rate_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "-0.1")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "0")]).is_ok());
    }

    #[test]
    fn test_empty_sentry_dsn_is_none() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
