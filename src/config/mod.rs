use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
    storage::json_backend::DEFAULT_RETENTION,
};

const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["currency", "locale", "data_file", "backup_retention"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_retention")]
    pub backup_retention: usize,
}

fn default_retention() -> usize {
    DEFAULT_RETENTION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_file: None,
            backup_retention: DEFAULT_RETENTION,
        }
    }
}

impl Config {
    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(LedgerError::Validation(format!(
                        "currency must be a three-letter code, got `{value}`"
                    )));
                }
                self.currency = value.to_ascii_uppercase();
            }
            "locale" => {
                if value.is_empty() {
                    return Err(LedgerError::Validation("locale must not be empty".into()));
                }
                self.locale = value.to_string();
            }
            "data_file" => {
                self.data_file = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "backup_retention" => {
                self.backup_retention = value.parse().map_err(|_| {
                    LedgerError::Validation(format!(
                        "backup_retention must be a whole number, got `{value}`"
                    ))
                })?;
            }
            other => {
                return Err(LedgerError::Validation(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Data file named by `config`, or the default one under the base dir.
    /// Relative paths are taken relative to the base dir.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        match &config.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => PathResolver::data_file_in(&self.base),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
