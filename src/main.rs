use anyhow::{Context, Result};
use clap::Parser;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use playback_relay::config;
use playback_relay::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Base URL of the internal services (user-profile and auth).
    #[clap(long)]
    pub base_url: Option<String>,

    /// Path prefix of the user-profile service, also used for the relay's own routes.
    #[clap(long)]
    pub api_prefix: Option<String>,

    /// Base URL of the music provider's Web API.
    #[clap(long, default_value = config::DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// The address to bind to.
    #[clap(long, default_value = config::DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Timeout in seconds for every outbound request.
    #[clap(long, default_value_t = config::DEFAULT_REQUEST_TIMEOUT_SEC)]
    pub request_timeout_sec: u64,

    /// Whether to store the fetched playback in the user's profile.
    #[clap(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub persist_playback: bool,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            base_url: args.base_url.clone(),
            api_prefix: args.api_prefix.clone(),
            provider_url: args.provider_url.clone(),
            bind_address: args.bind_address.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            request_timeout_sec: args.request_timeout_sec,
            persist_playback: args.persist_playback,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  base_url: {}", app_config.relay.base_url);
    info!("  api_prefix: {:?}", app_config.relay.api_prefix);
    info!("  provider_url: {}", app_config.provider_url);
    info!("  listen: {}", app_config.listen_address());
    info!("  persist_playback: {}", app_config.persist_playback);

    run_server(app_config).await
}
