/// Persistent key/value storage backed by redb.
///
/// One database file, one table of raw `&str` → `&str` pairs. Values are kept
/// as text so callers can store serialized documents without re-encoding.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::{KeyValueStore, StoreError, StoreResult};

/// Entries table: key → value.
const ENTRIES: TableDefinition<&str, &str> = TableDefinition::new("entries");

/// File name used when the store lives inside a data directory.
pub const DEFAULT_FILE_NAME: &str = "pdf-picker-store.redb";

pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbStore {
    /// Opens or creates the store database at `path`.
    ///
    /// Creates the parent directory if needed and makes sure the entries
    /// table exists so later reads never see a missing table.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the directory or database cannot
    /// be created.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::try_open(path).map_err(|e| StoreError::Unavailable {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open store database: {}", path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(ENTRIES)
                .context("Failed to create entries table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(ENTRIES)
            .context("Failed to open entries table")?;

        match table.get(key).context("Failed to read entry")? {
            Some(guard) => Ok(Some(guard.value().to_string())),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(ENTRIES)
                .context("Failed to open entries table")?;
            table
                .insert(key, value)
                .context("Failed to insert entry")?;
        }
        write_txn.commit().context("Failed to commit entry")?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(ENTRIES)
                .context("Failed to open entries table")?;
            table.remove(key).context("Failed to remove entry")?;
        }
        write_txn.commit().context("Failed to commit removal")?;
        Ok(())
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.read(key).map_err(|e| StoreError::backend("get", key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.write(key, value)
            .map_err(|e| StoreError::backend("set", key, e))
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.delete(key)
            .map_err(|e| StoreError::backend("remove", key, e))
    }
}
