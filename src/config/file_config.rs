use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Internal services
    pub base_url: Option<String>,
    pub api_prefix: Option<String>,

    // Music provider
    pub provider_url: Option<String>,

    // Server
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub request_timeout_sec: Option<u64>,
    pub persist_playback: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
