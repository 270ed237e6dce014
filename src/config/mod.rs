mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.spotify.com";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3005;
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub base_url: Option<String>,
    pub api_prefix: Option<String>,
    pub provider_url: String,
    pub bind_address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout_sec: u64,
    pub persist_playback: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_prefix: None,
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            logging_level: RequestsLoggingLevel::default(),
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
            persist_playback: true,
        }
    }
}

/// Location of the internal services: the user-profile service lives under
/// `{base_url}{api_prefix}/users`, the auth service under `{base_url}/auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub base_url: String,
    pub api_prefix: String,
}

impl RelayConfig {
    pub fn new(base_url: &str, api_prefix: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_url(base_url)?,
            api_prefix: normalize_prefix(api_prefix),
        })
    }

    pub fn users_endpoint(&self, action: &str) -> String {
        format!("{}{}/users/{}", self.base_url, self.api_prefix, action)
    }

    pub fn refresh_token_endpoint(&self) -> String {
        format!("{}/auth/refreshToken", self.base_url)
    }

    /// Path under which the relay's own routes are mounted.
    pub fn routes_prefix(&self) -> String {
        format!("{}/spotify", self.api_prefix)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub provider_url: String,
    pub bind_address: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub request_timeout_sec: u64,
    pub persist_playback: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let base_url = file
            .base_url
            .or_else(|| cli.base_url.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("base_url must be specified via --base-url or in config file")
            })?;

        let api_prefix = file
            .api_prefix
            .or_else(|| cli.api_prefix.clone())
            .unwrap_or_default();

        let relay = RelayConfig::new(&base_url, &api_prefix)?;

        let provider_url = normalize_url(
            &file
                .provider_url
                .unwrap_or_else(|| cli.provider_url.clone()),
        )?;

        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());
        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let request_timeout_sec = file
            .request_timeout_sec
            .unwrap_or(cli.request_timeout_sec);
        if request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }

        let persist_playback = file.persist_playback.unwrap_or(cli.persist_playback);

        Ok(Self {
            relay,
            provider_url,
            bind_address,
            port,
            logging_level,
            request_timeout_sec,
            persist_playback,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("URL must start with http:// or https://: {:?}", url);
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// Empty, or a path with a leading slash and no trailing slash.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
