use std::collections::BTreeMap;

pub mod records;
pub mod viewport;

pub use records::RecordStore;
pub use viewport::StoredViewport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    StorageUnavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageUnavailable => write!(f, "browser storage unavailable"),
            StoreError::Corrupt(msg) => write!(f, "stored value corrupt: {msg}"),
            StoreError::Io(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Client-local string key-value store (the shape of `window.localStorage`).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Returns `true` if the key existed.
    fn remove_item(&mut self, key: &str) -> Result<bool, StoreError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryKeyValueStore {
    entries: BTreeMap<String, String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{KeyValueStore, StoreError};

    /// `window.localStorage`, optionally namespaced by a key prefix.
    #[derive(Debug)]
    pub struct LocalStorageKeyValueStore {
        key_prefix: String,
    }

    impl LocalStorageKeyValueStore {
        pub fn new(key_prefix: impl Into<String>) -> Result<Self, StoreError> {
            // Fail early so callers can fall back to an in-memory store.
            window_local_storage()?;
            Ok(Self {
                key_prefix: key_prefix.into(),
            })
        }

        fn key(&self, key: &str) -> String {
            format!("{}{}", self.key_prefix, key)
        }
    }

    impl KeyValueStore for LocalStorageKeyValueStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            let storage = window_local_storage()?;
            storage
                .get_item(&self.key(key))
                .map_err(|e| StoreError::Io(format!("get_item({key}) failed: {:?}", e)))
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let storage = window_local_storage()?;
            storage
                .set_item(&self.key(key), value)
                .map_err(|e| StoreError::Io(format!("set_item({key}) failed: {:?}", e)))
        }

        fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
            let existed = self.get_item(key)?.is_some();
            let storage = window_local_storage()?;
            storage
                .remove_item(&self.key(key))
                .map_err(|e| StoreError::Io(format!("remove_item({key}) failed: {:?}", e)))?;
            Ok(existed)
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, StoreError> {
        let win = web_sys::window().ok_or(StoreError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| StoreError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(StoreError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageKeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageKeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageKeyValueStore {
    pub fn new(_key_prefix: impl Into<String>) -> Result<Self, StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStorageKeyValueStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn remove_item(&mut self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_set_get_remove() {
        let mut s = InMemoryKeyValueStore::new();
        assert_eq!(s.get_item("a").unwrap(), None);
        s.set_item("a", "1").unwrap();
        s.set_item("a", "2").unwrap();
        assert_eq!(s.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(s.len(), 1);
        assert!(s.remove_item("a").unwrap());
        assert!(!s.remove_item("a").unwrap());
        assert!(s.is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_is_unavailable_off_browser() {
        assert_eq!(
            LocalStorageKeyValueStore::new("").unwrap_err(),
            StoreError::StorageUnavailable
        );
    }
}
