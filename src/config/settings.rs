//! Process settings read from the environment (after `.env` is loaded).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8082;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/bookshelf";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// May omit the password when `vault` is set.
    pub database_url: String,
    pub max_connections: u32,
    pub body_limit: usize,
    pub vault: Option<VaultSettings>,
}

/// Where the database password is fetched from. Present only in vault mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSettings {
    pub endpoint: Option<String>,
    pub secret_name: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("BOOKSHELF_PORT") {
            Some(v) => parse_number("BOOKSHELF_PORT", &v)?,
            None => DEFAULT_PORT,
        };
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse_number("DATABASE_MAX_CONNECTIONS", &v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit = match get("BOOKSHELF_BODY_LIMIT") {
            Some(v) => parse_number("BOOKSHELF_BODY_LIMIT", &v)?,
            None => DEFAULT_BODY_LIMIT,
        };
        let vault = get("VAULT_SECRET_NAME").map(|secret_name| VaultSettings {
            endpoint: get("VAULT_ENDPOINT"),
            secret_name,
        });

        let settings = Settings {
            host: get("BOOKSHELF_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections,
            body_limit,
            vault,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }
        if self.body_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "BOOKSHELF_BODY_LIMIT",
                reason: "must be at least 1".into(),
            });
        }
        self.database_options()?;
        Ok(())
    }

    /// Connection options parsed from `database_url`, without any vault password applied.
    pub fn database_options(&self) -> Result<PgConnectOptions, ConfigError> {
        PgConnectOptions::from_str(&self.database_url).map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: e.to_string(),
        })
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: format!("'{}': {}", value, e),
    })
}
