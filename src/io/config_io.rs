use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "TASKDECK_CONFIG";
/// Environment variable overriding the server base URL
pub const URL_ENV: &str = "TASKDECK_URL";

/// Default config file path, respecting TASKDECK_CONFIG and XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    config_path_with(|key| std::env::var(key).ok())
}

fn config_path_with(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(path) = var(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = var("XDG_CONFIG_HOME")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/"))
                .join(".config")
        });
    config_dir.join("taskdeck").join("config.toml")
}

/// Read a config file. A missing file yields the defaults.
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the config named on the command line, or the default one.
///
/// An explicitly named file must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            read_config_from(path)
        }
        None => read_config_from(&config_path()),
    }
}

/// Base URL precedence: --url flag, TASKDECK_URL, config file, built-in default
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    resolve_base_url_with(flag, std::env::var(URL_ENV).ok(), config)
}

fn resolve_base_url_with(flag: Option<&str>, env: Option<String>, config: &Config) -> String {
    flag.map(str::to_string)
        .or(env.filter(|v| !v.is_empty()))
        .unwrap_or_else(|| config.server.base_url.clone())
}
