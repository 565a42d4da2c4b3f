use std::{net::SocketAddr, str::FromStr};
use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_NOTIFICATION_CAPACITY: &str = "64";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment and an optional `.env` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub run_migrations: bool,
    pub notification_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is optional
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_address = parse_or(&lookup, "BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", "true")?;
        let notification_capacity =
            parse_or(&lookup, "NOTIFICATION_CAPACITY", DEFAULT_NOTIFICATION_CAPACITY)?;

        if notification_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "NOTIFICATION_CAPACITY",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            database_url,
            bind_address,
            run_migrations,
            notification_capacity,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(err) => Err(ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/school")]).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/school");
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert!(config.run_migrations);
        assert_eq!(config.notification_capacity, 64);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUN_MIGRATIONS", "false"),
            ("NOTIFICATION_CAPACITY", "8"),
        ])
        .unwrap();

        assert_eq!(config.bind_address.port(), 8080);
        assert!(!config.run_migrations);
        assert_eq!(config.notification_capacity, 8);
    }

    #[test]
    fn test_missing_database_url() {
        assert_eq!(config(&[]), Err(ConfigError::Missing("DATABASE_URL")));
        assert_eq!(
            config(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("RUN_MIGRATIONS", "sometimes"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "RUN_MIGRATIONS",
                ..
            }
        ));

        let err = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("NOTIFICATION_CAPACITY", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "NOTIFICATION_CAPACITY",
                ..
            }
        ));
    }
}
