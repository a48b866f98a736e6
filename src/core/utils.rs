use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;

const DEFAULT_DIR_NAME: &str = ".tracker_core";
const HOME_ENV: &str = "TRACKER_CORE_HOME";
const DATA_FILE: &str = "transactions.json";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout under the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.tracker_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn data_file_in(base: &Path) -> PathBuf {
        base.join(DATA_FILE)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    /// Backups live beside the data file they protect.
    pub fn backup_dir_for(data_file: &Path) -> PathBuf {
        data_file
            .parent()
            .map(|parent| parent.join(BACKUP_DIR))
            .unwrap_or_else(|| PathBuf::from(BACKUP_DIR))
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    if !path.as_os_str().is_empty() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
