use chrono::{DateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::transaction::Transaction,
    errors::{LedgerError, Result},
};

use super::StorageBackend;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// A previous version of the data file kept under `backups/`.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// File-backed JSON persistence with atomic replace and rolling backups.
#[derive(Clone, Debug)]
pub struct JsonStorage {
    data_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    /// `retention` caps the number of backups kept; zero disables them.
    pub fn new(data_file: PathBuf, retention: usize) -> Result<Self> {
        if let Some(parent) = data_file.parent() {
            ensure_dir(parent)?;
        }
        let backups_dir = PathResolver::backup_dir_for(&data_file);
        Ok(Self {
            data_file,
            backups_dir,
            retention,
        })
    }

    /// Storage rooted at `root` (or the default application directory).
    pub fn in_dir(root: Option<PathBuf>, retention: usize) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        Self::new(PathResolver::data_file_in(&base), retention)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Backups newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let prefix = format!("{}_", self.file_stem());
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !name.starts_with(&prefix) {
                continue;
            }
            let metadata = entry.metadata().ok();
            entries.push(BackupInfo {
                name: name.to_string(),
                size_bytes: metadata.as_ref().map(|meta| meta.len()).unwrap_or(0),
                modified: metadata
                    .and_then(|meta| meta.modified().ok())
                    .map(DateTime::<Utc>::from),
                path,
            });
        }
        // Timestamped names are fixed width, so name order is creation order.
        entries.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(entries)
    }

    /// Replaces the data file with the named backup and returns its contents.
    ///
    /// The backup is parsed before anything is overwritten, and the current
    /// data file is itself backed up first.
    pub fn restore_backup(&self, name: &str) -> Result<Vec<Transaction>> {
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(LedgerError::Persistence(format!(
                "invalid backup name `{name}`"
            )));
        }
        let path = self.backups_dir.join(name);
        if !path.is_file() {
            return Err(LedgerError::Persistence(format!(
                "backup `{name}` not found"
            )));
        }
        let transactions = load_transactions_from_path(&path)?;
        self.write(&transactions)?;
        tracing::info!(backup = name, count = transactions.len(), "restored backup");
        Ok(transactions)
    }

    fn write(&self, transactions: &[Transaction]) -> Result<()> {
        if self.retention > 0 {
            self.backup_existing_file()?;
        }
        save_transactions_to_path(transactions, &self.data_file)
    }

    fn file_stem(&self) -> String {
        self.data_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("transactions")
            .to_string()
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.data_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        fs::copy(&self.data_file, self.next_backup_path())?;
        self.prune_backups()
    }

    /// A fresh backup path. Saves within the same millisecond get a
    /// zero-padded counter so names stay unique and still sort by age.
    fn next_backup_path(&self) -> PathBuf {
        let stamp = format!(
            "{}_{}",
            self.file_stem(),
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT)
        );
        let mut path = self
            .backups_dir
            .join(format!("{stamp}.{BACKUP_EXTENSION}"));
        let mut counter = 1u32;
        while path.exists() {
            path = self
                .backups_dir
                .join(format!("{stamp}_{counter:03}.{BACKUP_EXTENSION}"));
            counter += 1;
        }
        path
    }

    fn prune_backups(&self) -> Result<()> {
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                tracing::debug!(backup = %entry.name, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        if !self.data_file.exists() {
            return Ok(Vec::new());
        }
        load_transactions_from_path(&self.data_file)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        self.write(transactions)
    }

    fn describe(&self) -> String {
        self.data_file.display().to_string()
    }
}

/// Writes transactions to `path` by staging to a sibling temp file and renaming.
pub fn save_transactions_to_path(transactions: &[Transaction], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(transactions)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a transaction sequence from disk, returning structured errors on failure.
pub fn load_transactions_from_path(path: &Path) -> Result<Vec<Transaction>> {
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
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
    file.sync_all()?;
    Ok(())
}
