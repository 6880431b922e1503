use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set; add it to the environment or the .env file")]
    MissingApiKey,

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Invalid HOST value: {0}")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Dev,
    Prod,
}

impl AppEnvironment {
    pub fn from_env() -> Self {
        Self::from_value(env::var("APP_ENVIRONMENT").ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            None | Some("") | Some("dev") => AppEnvironment::Dev,
            Some(_) => AppEnvironment::Prod,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_api_base: Option<String>,
    pub bind_address: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let host: IpAddr = match get("HOST") {
            Some(host) => host.parse().map_err(|_| ConfigError::InvalidHost(host))?,
            None => DEFAULT_HOST,
        };

        let port = match get("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai_api_key,
            openai_org_id: get("OPENAI_ORG_ID"),
            openai_api_base: get("OPENAI_API_BASE"),
            bind_address: SocketAddr::new(host, port),
        })
    }
}
