//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use crate::paths::JotPaths;
use crate::storage::AtomicFile;
use jot_core::config::JotConfig;
use jot_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Configuration service that loads and caches the root configuration.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<JotConfig>>>,
}

impl ConfigService {
    /// Service for the platform config file (`~/.config/jot/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(JotPaths::default().config_file()?))
    }

    /// Service for a custom config path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the configuration, reading the file on first access.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn get_config(&self) -> Result<JotConfig> {
        if let Ok(cached) = self.config.read() {
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = AtomicFile::<JotConfig>::toml(self.path.clone())
            .load()?
            .unwrap_or_default();
        debug!("[Config] Loaded configuration from {}", self.path.display());

        if let Ok(mut cache) = self.config.write() {
            *cache = Some(loaded.clone());
        }
        Ok(loaded)
    }

    /// Writes `config` atomically and refreshes the cache.
    pub fn save_config(&self, config: &JotConfig) -> Result<()> {
        AtomicFile::<JotConfig>::toml(self.path.clone()).save(config)?;
        if let Ok(mut cache) = self.config.write() {
            *cache = Some(config.clone());
        }
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.config.write() {
            *cache = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jot_core::session::Language;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config().unwrap(), JotConfig::default());
    }

    #[test]
    fn test_save_then_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let config = JotConfig {
            language: Language::He,
            ..JotConfig::default()
        };
        service.save_config(&config).unwrap();

        let fresh = ConfigService::with_path(path);
        assert_eq!(fresh.get_config().unwrap().language, Language::He);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "language = [").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(err.is_serialization());
    }
}
