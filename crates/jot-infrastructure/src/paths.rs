//! Platform paths for jot configuration and data files.
//!
//! ```text
//! ~/.config/jot/          # Config directory
//! └── config.toml         # Application configuration
//!
//! ~/.local/share/jot/     # Data directory
//! └── notes.json          # Note store
//! ```

use jot_core::error::{JotError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "jot";

/// Resolves jot's files under the platform config/data directories.
///
/// An explicit base directory replaces both roots, which keeps tests away
/// from the real home directory.
#[derive(Debug, Clone, Default)]
pub struct JotPaths {
    base_dir: Option<PathBuf>,
}

impl JotPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the jot configuration directory (e.g. `~/.config/jot/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| JotError::config("Cannot find config directory")),
        }
    }

    /// Returns the jot data directory (e.g. `~/.local/share/jot/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| JotError::config("Cannot find data directory")),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn notes_file(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("notes.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_overrides_platform_dirs() {
        let paths = JotPaths::new(Some(PathBuf::from("/tmp/jot-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/jot-test/config.toml")
        );
        assert_eq!(
            paths.notes_file().unwrap(),
            PathBuf::from("/tmp/jot-test/notes.json")
        );
    }
}
