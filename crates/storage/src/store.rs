use anyhow::{anyhow, Context, Result};
use sled::Db;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Minimal string key-value store the gateway persists into.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

/// Durable store on top of a sled database.
#[derive(Clone)]
pub struct SledStore {
    db: Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::open(path).with_context(|| format!("Failed to open store at {}", path.display()))?;
        Ok(Self { db })
    }

    /// Throwaway database removed when dropped.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .context("Failed to open temporary store")?;
        Ok(Self { db })
    }

    fn tree(&self) -> Result<sled::Tree> {
        Ok(self.db.open_tree("form")?)
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let bytes = match self.tree()?.get(key.as_bytes())? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| anyhow!("stored value for {key} is not UTF-8: {e}"))?;
        Ok(Some(text))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let tree = self.tree()?;
        tree.insert(key.as_bytes(), value.as_bytes())?;
        tree.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let tree = self.tree()?;
        tree.remove(key.as_bytes())?;
        tree.flush()?;
        Ok(())
    }
}

/// Process-local store, for tests and runs that should leave nothing behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| anyhow!("memory store poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
