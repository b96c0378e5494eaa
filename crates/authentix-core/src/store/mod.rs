//! Injected key-value persistence for client-side preferences.
//!
//! Stores have an explicit lifecycle: call [`KeyValueStore::open`] at
//! process or session start and [`KeyValueStore::close`] at teardown. Any
//! access while closed fails with `StoreClosed`.

pub mod file;
pub mod memory;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AuthentixError, Result};

pub use file::FileStore;
pub use memory::MemoryStore;

pub trait KeyValueStore {
    fn open(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;

    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a trimmed value. An empty value clears the key.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn clear(&mut self, key: &str) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}

/// A store shared by several consumers (auth session, discovery prefs).
#[derive(Debug)]
pub struct SharedStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>> {
        self.inner
            .lock()
            .map_err(|_| AuthentixError::Store("store lock poisoned".into()))
    }
}

impl<S: KeyValueStore> KeyValueStore for SharedStore<S> {
    fn open(&mut self) -> Result<()> {
        self.lock()?.open()
    }

    fn is_open(&self) -> bool {
        self.lock().map(|s| s.is_open()).unwrap_or(false)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.lock()?.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.set(key, value)
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        self.lock()?.clear(key)
    }

    fn close(&mut self) -> Result<()> {
        self.lock()?.close()
    }
}
