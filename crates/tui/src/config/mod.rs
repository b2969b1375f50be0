use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/butce_tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Bearer token attached to every request, when set.
    pub token: Option<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_file: String,
    pub state_file: String,
    /// Year to open with. Falls back to the remembered one, then the current.
    pub year: Option<i32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api/".to_string(),
            token: None,
            request_timeout_secs: client::DEFAULT_TIMEOUT.as_secs(),
            log_level: "info".to_string(),
            log_file: "config/butce_tui.log".to_string(),
            state_file: "config/butce_tui_state.json".to_string(),
            year: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Parser)]
#[command(name = "butce_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000/api/).
    #[arg(long)]
    base_url: Option<String>,
    /// Open this year instead of the remembered one.
    #[arg(long)]
    year: Option<i32>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the request timeout, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BUTCE_TUI").try_parsing(true));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(year) = args.year {
        settings.year = Some(year);
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }

    Ok(settings)
}
