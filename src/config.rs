//! Dev server configuration parsed from environment variables.
//!
//! All variables are optional:
//! - `PORT`: listen port, default 8080
//! - `API_ORIGIN`: backend that `/api` is proxied to, default `http://localhost:8000`
//! - `DIST_DIR`: built client bundle, default `client/dist`
//! - `PROXY_WS`: proxy websocket upgrades, default on

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_DIST_DIR: &str = "client/dist";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    Port(String),
    #[error("API_ORIGIN must be an http:// or https:// origin, got {0:?}")]
    Origin(String),
    #[error("invalid {key}: {value:?} (expected 1/true/yes/on or 0/false/no/off)")]
    Bool { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Scheme and authority only, no trailing slash.
    pub api_origin: String,
    pub dist_dir: PathBuf,
    pub proxy_ws: bool,
}

impl Config {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first malformed variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Port(raw))?,
            None => DEFAULT_PORT,
        };

        let api_origin = var("API_ORIGIN").unwrap_or_else(|| DEFAULT_API_ORIGIN.to_owned());
        let api_origin = normalize_origin(&api_origin).ok_or(ConfigError::Origin(api_origin))?;

        let dist_dir = var("DIST_DIR").map_or_else(|| PathBuf::from(DEFAULT_DIST_DIR), PathBuf::from);

        let proxy_ws = match var("PROXY_WS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Bool { key: "PROXY_WS", value: raw })?,
            None => true,
        };

        Ok(Self { port, api_origin, dist_dir, proxy_ws })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_origin(raw: &str) -> Option<String> {
    let origin = raw.trim_end_matches('/');
    let host = origin.strip_prefix("http://").or_else(|| origin.strip_prefix("https://"))?;
    if host.is_empty() || host.contains(['/', '?', '#']) {
        return None;
    }
    Some(origin.to_owned())
}
