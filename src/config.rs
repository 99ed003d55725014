//! read gateway configuration from a file, the environment, or explicit values

use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

pub enum ConfigLocation {
    File(String),
    Env,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_login_route")]
    pub login_route: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_log_traffic")]
    pub log_traffic: bool,
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_login_route() -> String {
    DEFAULT_LOGIN_ROUTE.to_string()
}

fn default_log_traffic() -> bool {
    true
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn load(loc: ConfigLocation) -> Result<Self, Error> {
        match loc {
            ConfigLocation::File(path) => Self::from_file(path),
            ConfigLocation::Env => Self::from_env(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Malformed config file: {}", e)))
    }

    /// # ENV Vars
    /// * `GYM_API_URL` - Backend base address (required)
    /// * `GYM_API_PREFIX` - Versioned path prefix, defaults to `/api/v1`
    /// * `GYM_LOGIN_ROUTE` - Route opened when the session cannot be renewed
    /// * `GYM_API_TIMEOUT_SECS` - Optional per-request timeout
    /// * `GYM_API_LOG_TRAFFIC` - `false` disables request/response diagnostics
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("GYM_API_URL")
            .map_err(|_| Error::Config("Missing GYM_API_URL env var".to_string()))?;
        let timeout_secs = match std::env::var("GYM_API_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|_| {
                Error::Config(format!("GYM_API_TIMEOUT_SECS is not a number: '{}'", raw))
            })?),
            Err(_) => None,
        };
        let log_traffic = match std::env::var("GYM_API_LOG_TRAFFIC") {
            Ok(raw) => raw.parse::<bool>().map_err(|_| {
                Error::Config(format!("GYM_API_LOG_TRAFFIC is not a bool: '{}'", raw))
            })?,
            Err(_) => true,
        };
        let api_prefix = env_or("GYM_API_PREFIX", DEFAULT_API_PREFIX);
        let login_route = env_or("GYM_LOGIN_ROUTE", DEFAULT_LOGIN_ROUTE);
        Ok(Config {
            base_url,
            api_prefix,
            login_route,
            timeout_secs,
            log_traffic,
        })
    }

    pub fn from_values(
        base_url: impl Into<String>,
        api_prefix: Option<String>,
        login_route: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        Config {
            base_url: base_url.into(),
            api_prefix: api_prefix.unwrap_or_else(default_api_prefix),
            login_route: login_route.unwrap_or_else(default_login_route),
            timeout_secs,
            log_traffic: true,
        }
    }

    /// Base address plus versioned prefix, without a trailing slash.
    ///
    /// A base address without a scheme is treated as `https://`.
    pub fn api_root(&self) -> Result<String, Error> {
        let base = if self.base_url.starts_with("http") {
            self.base_url.clone()
        } else {
            format!("https://{}", self.base_url)
        };
        Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base, e)))?;
        let base = base.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            Ok(base.to_string())
        } else {
            Ok(format!("{}/{}", base, prefix))
        }
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }
}
