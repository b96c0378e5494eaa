use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AuthentixError, Result};
use crate::store::KeyValueStore;

/// Store persisted as a flat TOML table.
///
/// The file is read on `open` and rewritten after every mutation, so a crash
/// never loses an acknowledged write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    open: bool,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            open: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(AuthentixError::StoreClosed)
        }
    }

    fn flush(&self) -> Result<()> {
        let text = toml::to_string(&self.entries)
            .map_err(|e| AuthentixError::Store(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Persist a change to `key`; if that fails, put back its `previous` value
    /// so memory keeps matching the file.
    fn flush_or_restore(&mut self, key: &str, previous: Option<String>) -> Result<()> {
        let Err(e) = self.flush() else {
            return Ok(());
        };
        warn!(
            path = %self.path.display(),
            key,
            error = %e,
            "Store write failed, change rolled back"
        );
        match previous {
            Some(value) => {
                self.entries.insert(key.to_string(), value);
            }
            None => {
                self.entries.remove(key);
            }
        }
        Err(e)
    }
}

impl KeyValueStore for FileStore {
    fn open(&mut self) -> Result<()> {
        self.entries = if self.path.exists() {
            let text = std::fs::read_to_string(&self.path)?;
            toml::from_str(&text).map_err(|e| {
                AuthentixError::Store(format!("{}: {e}", self.path.display()))
            })?
        } else {
            BTreeMap::new()
        };
        self.open = true;
        debug!(path = %self.path.display(), keys = self.entries.len(), "Store opened");
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_open()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_open()?;
        let value = value.trim();
        let previous = if value.is_empty() {
            self.entries.remove(key)
        } else {
            self.entries.insert(key.to_string(), value.to_string())
        };
        self.flush_or_restore(key, previous)
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.ensure_open()?;
        match self.entries.remove(key) {
            Some(previous) => self.flush_or_restore(key, Some(previous)),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.flush()?;
        self.entries.clear();
        self.open = false;
        debug!(path = %self.path.display(), "Store closed");
        Ok(())
    }
}
