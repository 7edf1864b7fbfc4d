//! Configuration service implementation.
//!
//! Loads [`AmigosConfig`] from `~/.config/amigos/config.toml`, writing a
//! default file on first use, and layers the `TRON_PRO_API_KEY` /
//! `AMIGOS_CONTRACT_ADDRESS` environment variables on top.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use amigos_core::Result;
use amigos_core::config::AmigosConfig;

use crate::paths::AmigosPaths;

/// Loads and caches the host configuration.
///
/// The file is read once; later calls return the cached value until
/// [`ConfigService::invalidate_cache`] is called.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration, environment overrides already applied.
    config: Arc<RwLock<Option<AmigosConfig>>>,
}

impl ConfigService {
    /// Service for the default config location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(AmigosPaths::config_file()?))
    }

    /// Service for an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading it from disk if not cached.
    pub fn get_config(&self) -> Result<AmigosConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load(|key| std::env::var(key).ok())?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to disk and replaces the cache.
    ///
    /// Environment overrides are not persisted; they are re-applied on the
    /// next load.
    pub fn save_config(&self, config: &AmigosConfig) -> Result<()> {
        Self::write_file(&self.path, config)?;
        tracing::info!("[Config] Saved {}", self.path.display());
        self.invalidate_cache();
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn load<F>(&self, lookup: F) -> Result<AmigosConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            let config: AmigosConfig = toml::from_str(&content)?;
            tracing::debug!("[Config] Loaded {}", self.path.display());
            config
        } else {
            let config = AmigosConfig::default();
            Self::write_file(&self.path, &config)?;
            tracing::info!("[Config] Created default config at {}", self.path.display());
            config
        };

        config.apply_env_overrides(lookup);
        Ok(config)
    }

    fn write_file(path: &Path, config: &AmigosConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amigos_core::config::{DEFAULT_FULL_HOST, ENV_API_KEY, ENV_CONTRACT_ADDRESS};
    use amigos_core::i18n::Language;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let service = ConfigService::with_path(&path);

        let config = service.load(no_env).unwrap();

        assert_eq!(config, AmigosConfig::default());
        assert!(path.exists());
        let written: AmigosConfig = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, AmigosConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[ui]\ndefault_language = \"pt\"\n\n[confirmation]\nmax_attempts = 5\n",
        )
        .unwrap();

        let config = ConfigService::with_path(&path).load(no_env).unwrap();

        assert_eq!(config.ui.default_language, Language::Pt);
        assert_eq!(config.confirmation.max_attempts, 5);
        assert_eq!(config.confirmation.poll_interval_ms, 3_000);
        assert_eq!(config.network.full_host, DEFAULT_FULL_HOST);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[network]\napi_key = \"from-file\"\n").unwrap();

        let config = ConfigService::with_path(&path)
            .load(|key| match key {
                ENV_API_KEY => Some("from-env".to_string()),
                ENV_CONTRACT_ADDRESS => Some(String::new()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.network.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.contract.address, None);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[network\nfull_host = ").unwrap();

        let err = ConfigService::with_path(&path).load(no_env).unwrap_err();
        assert!(matches!(err, amigos_core::AmigosError::Serialization { .. }));
    }

    #[test]
    fn test_save_invalidates_cache() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));

        let mut config = service.get_config().unwrap();
        config.contract.fee_limit_sun = 50_000_000;
        service.save_config(&config).unwrap();

        let reloaded = service.get_config().unwrap();
        assert_eq!(reloaded.contract.fee_limit_sun, 50_000_000);
    }
}
