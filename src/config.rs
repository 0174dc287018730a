use std::net::{AddrParseError, SocketAddr};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("BOOKSHELF_ADDR `{value}` is not a socket address: {source}")]
    InvalidAddr {
        value: String,
        source: AddrParseError,
    },
}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub log_filter: String,
}

impl Config {
    /// `BOOKSHELF_ADDR` picks the listen address; `BOOKSHELF_LOG`, then
    /// `RUST_LOG`, the tracing filter.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("BOOKSHELF_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr
            .parse()
            .map_err(|source| ConfigError::InvalidAddr { value: addr, source })?;

        let log_filter = lookup("BOOKSHELF_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self { addr, log_filter })
    }
}
