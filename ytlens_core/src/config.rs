use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub youtube: YouTubeConfig,
}

/// Settings for the HTTP side of the YouTube connector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct YouTubeConfig {
    /// Origin used for the search and watch pages.
    pub base_url: String,
    pub user_agent: String,
    pub accept_language: String,
    /// Per-request timeout. Unset means requests may take as long as the server does.
    pub timeout_secs: Option<u64>,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// `~/.config/ytlens/config.toml` (Unix) or `%APPDATA%/ytlens/config.toml` (Windows).
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("ytlens").join("config.toml")
    }

    /// Load from an explicit path, or from the default location when it exists.
    /// Falls back to built-in defaults when no file is present at the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_remaining_defaults() {
        let config = Config::from_toml_str(
            r#"
            [youtube]
            accept_language = "de-DE,de;q=0.8"
            timeout_secs = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.youtube.accept_language, "de-DE,de;q=0.8");
        assert_eq!(config.youtube.timeout_secs, Some(20));
        assert_eq!(config.youtube.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.youtube.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here/ytlens.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
