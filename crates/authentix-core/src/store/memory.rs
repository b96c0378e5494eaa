use std::collections::BTreeMap;

use crate::error::{AuthentixError, Result};
use crate::store::KeyValueStore;

/// Process-local store; contents are dropped on `close`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    open: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(AuthentixError::StoreClosed)
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn open(&mut self) -> Result<()> {
        self.open = true;
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
        if value.is_empty() {
            self.entries.remove(key);
        } else {
            self.entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.ensure_open()?;
        self.entries.remove(key);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.entries.clear();
        self.open = false;
        Ok(())
    }
}
