use std::net::SocketAddr;
use std::time::Duration;

use eyre::{eyre, WrapErr};
use strum::{Display, EnumString};

/// Timeout for a single call to the metadata service.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Info,
    Debug,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub run_address: SocketAddr,
    pub database_uri: String,
    pub info_service_address: String,
    pub log_level: LogLevel,
    pub client_timeout: Duration,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> eyre::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| eyre!("missing env var: {key}"))
        };

        let run_address = required("RUN_ADDRESS")?
            .trim()
            .parse::<SocketAddr>()
            .wrap_err("RUN_ADDRESS must be a socket address (host:port)")?;
        let database_uri = required("DATABASE_URI")?;
        let info_service_address = required("INFO_SERVICE_ADDRESS")?
            .trim()
            .trim_end_matches('/')
            .to_string();
        let log_level = required("LOG_LEVEL")?
            .trim()
            .parse::<LogLevel>()
            .wrap_err("LOG_LEVEL must be one of: info, debug")?;

        Ok(Self {
            run_address,
            database_uri,
            info_service_address,
            log_level,
            client_timeout: CLIENT_TIMEOUT,
        })
    }
}
