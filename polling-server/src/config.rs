//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::directory::{CacheConfig, DirectoryConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} is not set (or set POLLING_DATA_FILE to use a local dataset)")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where polling station records come from.
#[derive(Debug, Clone)]
pub enum DirectorySource {
    /// JSON file served from memory.
    File(PathBuf),
    /// Hosted Supabase table.
    Supabase(DirectoryConfig),
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub source: DirectorySource,
    pub cache: CacheConfig,
    pub log_filter: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or("POLLING_BIND_ADDR", get("POLLING_BIND_ADDR"), || {
            DEFAULT_BIND_ADDR.parse().ok()
        })?;

        let source = match get("POLLING_DATA_FILE") {
            Some(path) => DirectorySource::File(PathBuf::from(path)),
            None => {
                let url = get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
                let key =
                    get("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
                let mut config = DirectoryConfig::new(url, key);
                if let Some(table) = get("POLLING_TABLE") {
                    config = config.with_table(table);
                }
                DirectorySource::Supabase(config)
            }
        };

        let defaults = CacheConfig::default();
        let ttl_secs = parse_or("POLLING_CACHE_TTL_SECS", get("POLLING_CACHE_TTL_SECS"), || {
            Some(defaults.ttl.as_secs())
        })?;
        let max_capacity =
            parse_or("POLLING_CACHE_CAPACITY", get("POLLING_CACHE_CAPACITY"), || {
                Some(defaults.max_capacity)
            })?;

        let log_filter = get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_addr,
            source,
            cache: CacheConfig {
                ttl: Duration::from_secs(ttl_secs),
                max_capacity,
            },
            log_filter,
        })
    }
}

/// Parse `value` if present, otherwise fall back to `default`.
fn parse_or<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    default: impl FnOnce() -> Option<T>,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => default().ok_or(ConfigError::Invalid {
            var,
            value: String::new(),
        }),
    }
}
