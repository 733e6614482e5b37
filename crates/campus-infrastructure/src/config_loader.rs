//! Loading of `config.toml` into [`ApiConfig`].

use crate::paths::CampusPaths;
use campus_core::config::ApiConfig;
use campus_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `base_url`.
pub const API_URL_ENV: &str = "CAMPUS_API_URL";

/// Reads the API configuration file.
///
/// Responsibilities:
/// - Parse config.toml into `ApiConfig`
/// - Fall back to defaults when the file is missing or empty
/// - Apply environment overrides
///
/// Does NOT:
/// - Write or create the file
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the default path (~/.config/campus/config.toml).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: CampusPaths::config_file()?,
        })
    }

    /// Creates a loader for a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, including overrides from the process environment.
    pub fn load(&self) -> Result<ApiConfig> {
        let config = self.load_file()?;
        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Loads the configuration from the file alone.
    pub fn load_file(&self) -> Result<ApiConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigLoader] {} not found, using defaults",
                self.path.display()
            );
            return Ok(ApiConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ApiConfig::default());
        }

        let config: ApiConfig = toml::from_str(&content)?;
        tracing::info!(
            "[ConfigLoader] Loaded {} (base_url: {})",
            self.path.display(),
            config.base_url
        );
        Ok(config)
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ApiConfig, lookup: F) -> ApiConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
        tracing::debug!("[ConfigLoader] {} overrides base_url", API_URL_ENV);
        config.base_url = url;
    }
    config
}
