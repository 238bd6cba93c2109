use crate::error::{BiblioError, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 6379;
pub const DEFAULT_DB: i64 = 0;
pub const DEFAULT_PREFIX: &str = "libro";
pub const DEFAULT_TIMEOUT_SECS: u64 = 4;

pub const ENV_HOST: &str = "KEYDB_HOST";
pub const ENV_PORT: &str = "KEYDB_PORT";
pub const ENV_PASSWORD: &str = "KEYDB_PASSWORD";
pub const ENV_DB: &str = "KEYDB_DB";
pub const ENV_PREFIX: &str = "KEY_PREFIX";
pub const ENV_TIMEOUT: &str = "KEYDB_TIMEOUT_SECS";

/// Connection parameters for the KeyDB/Redis store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
    /// Namespace prefix for record keys
    pub prefix: String,
    /// Applies to connecting and to every command round-trip
    pub timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            db: DEFAULT_DB,
            prefix: DEFAULT_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("db", &self.db)
            .field("prefix", &self.prefix)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StoreSettings {
    /// Load settings from the process environment.
    ///
    /// Callers wanting `.env` support should load it first.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`, falling back to defaults for unset
    /// or blank variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            host: get(ENV_HOST).unwrap_or(defaults.host),
            port: parse_var(ENV_PORT, get(ENV_PORT))?.unwrap_or(defaults.port),
            password: get(ENV_PASSWORD),
            db: parse_var(ENV_DB, get(ENV_DB))?.unwrap_or(defaults.db),
            prefix: get(ENV_PREFIX).unwrap_or(defaults.prefix),
            timeout: parse_var(ENV_TIMEOUT, get(ENV_TIMEOUT))?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        })
    }

    /// `redis://host:port/db`, without credentials.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

fn parse_var<T: FromStr>(name: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                BiblioError::Config(format!("{} has an invalid value: '{}'", name, raw))
            })
        })
        .transpose()
}
