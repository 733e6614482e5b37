//! Path management for campus configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/campus/            # Config directory (platform config dir)
//! ├── config.toml              # API configuration
//! └── session.json             # Session key-value store (access token)
//! ```

use campus_core::error::{CampusError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "campus";

pub struct CampusPaths;

impl CampusPaths {
    /// Returns the campus configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/campus/`)
    /// - `Err(CampusError::Config)`: Could not determine the platform config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CampusError::config("Cannot find config directory"))
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the session store.
    ///
    /// The file holds the access token; it should only be readable by the
    /// owning user.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
