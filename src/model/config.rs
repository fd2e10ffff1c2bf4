use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. 0 disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file. The TUI only logs when this (or --log-file) is set.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive, e.g. "taskdeck=debug"
    #[serde(default)]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.timeout(), Some(Duration::from_secs(10)));
        assert!(config.ui.show_key_hints);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config: Config = toml::from_str("[server]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.timeout(), None);
    }

    #[test]
    fn reads_all_sections() {
        let config: Config = toml::from_str(
            r##"
[server]
base_url = "http://tasks.local:9000"

[ui]
show_key_hints = false
[ui.colors]
highlight = "#112233"

[log]
file = "/tmp/td.log"
filter = "taskdeck=debug"
"##,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "http://tasks.local:9000");
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/td.log")));
        assert_eq!(config.log.filter.as_deref(), Some("taskdeck=debug"));
    }
}
