//! Path management for amigos configuration files.

use std::path::PathBuf;

use amigos_core::{AmigosError, Result};

const APP_DIR: &str = "amigos";

/// Resolves the on-disk locations used by the host.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/amigos/       # Config directory (platform config dir)
/// └── config.toml         # Network, contract, confirmation and UI settings
/// ```
pub struct AmigosPaths;

impl AmigosPaths {
    /// Returns the amigos configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/amigos/`
    /// - `Err(AmigosError::Config)`: the platform has no config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| AmigosError::config("Cannot find config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
