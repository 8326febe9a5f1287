use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Start with the default directory entries instead of an empty store
    pub seed_users: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            seed_users: true,
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT` and `SEED_USERS`, falling back to defaults for
    /// unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "HOST", value })?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => defaults.port,
        };

        let seed_users = match lookup("SEED_USERS") {
            Some(value) => parse_flag(&value)
                .ok_or(ConfigError::InvalidValue { name: "SEED_USERS", value })?,
            None => defaults.seed_users,
        };

        Ok(Self {
            host,
            port,
            seed_users,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
