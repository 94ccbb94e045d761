use std::{net::SocketAddr, time::Duration};
use thiserror::Error;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Downstream calls are bounded to this window
const REQUEST_TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 5..=10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub db_max_connections: u32,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(DEFAULT_BIND_ADDR))?;
        let timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;

        let timeout_secs = timeout_secs.clamp(
            *REQUEST_TIMEOUT_RANGE.start(),
            *REQUEST_TIMEOUT_RANGE.end(),
        );

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            db_max_connections,
        })
    }
}

/// Parses `name` when it is set, otherwise falls back to `default`
fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/restaurant"),
            ("JWT_SECRET", "secret"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn test_required_values() {
        assert_eq!(
            load(&[("JWT_SECRET", "secret")]).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
        assert_eq!(
            load(&[("DATABASE_URL", "postgres://db"), ("JWT_SECRET", "  ")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_timeout_is_clamped() {
        let base = [("DATABASE_URL", "postgres://db"), ("JWT_SECRET", "secret")];

        let short = load(&[base[0], base[1], ("REQUEST_TIMEOUT_SECS", "1")]).unwrap();
        assert_eq!(short.request_timeout, Duration::from_secs(5));

        let long = load(&[base[0], base[1], ("REQUEST_TIMEOUT_SECS", "60")]).unwrap();
        assert_eq!(long.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", "secret"),
            ("BIND_ADDR", "localhost"),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { name: "BIND_ADDR", .. }));
    }
}
