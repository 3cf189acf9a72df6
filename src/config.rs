//! Configuration loading.
//!
//! Sources merge in priority order: built-in defaults, then `trainctl.toml`
//! in the working directory, then `TRAINCTL_*` environment variables, then
//! explicit CLI overrides.

use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Default backend address, matching the controller service's default port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "trainctl.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the job-execution backend.
    pub base_url: String,
    /// Seconds between job list refreshes.
    pub poll_interval_secs: u64,
    pub verbose: bool,
    /// Emit logs as JSON instead of pretty console output.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: 5,
            verbose: false,
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration, merging CLI overrides on top when given.
    pub fn new<T: Serialize>(overrides: Option<&T>) -> Result<Self> {
        Self::load(Path::new(CONFIG_FILE), overrides)
    }

    /// Load configuration with an explicit config file path.
    pub fn load<T: Serialize>(config_file: &Path, overrides: Option<&T>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed("TRAINCTL_"));

        if let Some(args) = overrides {
            let args = serde_json::to_value(args).context("Failed to serialize CLI overrides")?;
            figment = figment.merge(Serialized::defaults(args));
        }

        figment.extract().context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Overrides {
        #[serde(skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            AppConfig::load(&dir.path().join(CONFIG_FILE), None::<&Overrides>).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval_secs, 5);
        assert!(!config.verbose);
        assert!(!config.log_json);
    }

    #[test]
    fn log_json_is_configurable_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "log_json = true\n").unwrap();

        let config = AppConfig::load(&path, None::<&Overrides>).unwrap();
        assert!(config.log_json);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "base_url = \"http://10.0.0.5:8000\"\npoll_interval_secs = 2\n")
            .unwrap();

        let config = AppConfig::load(&path, None::<&Overrides>).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.poll_interval_secs, 2);
    }

    #[test]
    fn cli_overrides_win_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "base_url = \"http://10.0.0.5:8000\"\n").unwrap();

        let overrides = Overrides {
            base_url: Some("http://127.0.0.1:9000".to_string()),
        };
        let config = AppConfig::load(&path, Some(&overrides)).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }
}
