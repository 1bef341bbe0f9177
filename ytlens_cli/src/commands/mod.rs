pub mod info;
pub mod search;
pub mod transcript;

use crate::cli::Cli;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use thiserror::Error;
use ytlens_core::config::ConfigError;
use ytlens_core::connectors::youtube::YouTubeConnector;
use ytlens_core::Config;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Core(#[from] ytlens_core::error::ConnectorError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Connector configured from `--config` (or the default config file).
pub fn connector(cli: &Cli) -> Result<YouTubeConnector> {
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(base_url = %config.youtube.base_url, "configuration loaded");
    Ok(YouTubeConnector::new(&config.youtube)?)
}

/// Spinner on stderr so piped stdout stays clean.
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
