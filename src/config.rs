use std::path::{Path, PathBuf};

use thiserror::Error;

const VAULT_DIR_NAME: &str = ".totion";
const LOG_FILE_NAME: &str = "totion.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    HomeDirNotFound,
}

/// Process-wide settings, resolved once at startup and handed to whoever needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    vault_dir: PathBuf,
    log_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| home.join(".cache"));

        Ok(Self {
            vault_dir: home.join(VAULT_DIR_NAME),
            log_path: cache_dir.join("totion").join(LOG_FILE_NAME),
        })
    }

    #[cfg(test)]
    pub fn with_vault_dir(vault_dir: impl Into<PathBuf>) -> Self {
        let vault_dir = vault_dir.into();
        let log_path = std::env::temp_dir().join("totion").join(LOG_FILE_NAME);
        Self { vault_dir, log_path }
    }

    pub fn vault_dir(&self) -> &Path {
        &self.vault_dir
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
