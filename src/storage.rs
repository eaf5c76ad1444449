//! Durable key/value storage for visitor-local state.
//!
//! Mirrors the browser's `localStorage` contract (string keys, string values)
//! on top of a JSON file. When the file cannot be opened the store degrades to
//! memory only, which keeps the page working but loses values across reloads.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Visitor session identifier.
pub const SESSION_ID_KEY: &str = "sessionId";
/// Last language chosen with the language toggle.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";
/// Serialized auth session.
pub const AUTH_SESSION_KEY: &str = "sb-auth-token";

#[derive(Debug)]
struct Inner {
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: Arc<Mutex<Inner>>,
}

impl LocalStorage {
    /// Open (or create) the storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let items = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                Error::Storage(format!("Failed to read {}: {}", path.display(), e))
            })?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    Error::Storage(format!("Corrupt storage file {}: {}", path.display(), e))
                })?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
            fs::write(&path, "{}").map_err(|e| {
                Error::Storage(format!("Failed to create {}: {}", path.display(), e))
            })?;
            BTreeMap::new()
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                path: Some(path),
                items,
            })),
        })
    }

    /// Open the file at `path`, falling back to memory-only storage.
    pub fn open_or_memory(path: impl AsRef<Path>) -> Self {
        match Self::open(path.as_ref()) {
            Ok(storage) => storage,
            Err(e) => {
                warn!("Local storage unavailable, using in-memory fallback: {}", e);
                Self::in_memory()
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                path: None,
                items: BTreeMap::new(),
            })),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.lock().path.is_some()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.lock().items.get(key).cloned()
    }

    /// Store `value` under `key`. The in-memory value is updated even when
    /// writing the file fails.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.items.insert(key.to_string(), value.to_string());
        Self::flush(&inner)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.items.remove(key).is_none() {
            return Ok(());
        }
        Self::flush(&inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(inner: &Inner) -> Result<()> {
        let Some(path) = &inner.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&inner.items)
            .map_err(|e| Error::Storage(format!("Failed to serialize storage: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }
}
