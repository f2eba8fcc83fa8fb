//! Key-value persistence port.
//!
//! The browser's `localStorage` is the only persistent store the workspace
//! uses. Everything that reads or writes it goes through [`KeyValueStore`]
//! so the résumé library and settings can be exercised against
//! [`MemoryStore`] in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::AppError;

/// String-keyed persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// `window.localStorage`, looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, AppError> {
        web_sys::window()
            .ok_or_else(|| AppError::Storage("No window available".to_string()))?
            .local_storage()
            .map_err(|e| AppError::Storage(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| AppError::Storage("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| AppError::Storage(format!("Failed to read '{}': {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("Failed to write '{}': {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| AppError::Storage(format!("Failed to remove '{}': {:?}", key, e)))
    }
}

/// In-memory store. `fail_writes` makes every `set`/`remove` fail, which
/// lets callers check that a rejected write leaves their state untouched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(AppError::Storage("quota exceeded".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        if self.fail_writes {
            return Err(AppError::Storage("quota exceeded".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_failing_store_rejects_writes() {
        let store = MemoryStore::failing_writes();
        assert!(matches!(store.set("k", "v"), Err(AppError::Storage(_))));
        assert_eq!(store.get("k").unwrap(), None);
    }
}
